use crate::common::IntensityRange;

use super::{
    ColorTransferFunction, Interpolation, OpacityComponent, PiecewiseFunction, ProfileKind,
    Shading, TransferFunctionProfile, VolumeProperty,
};

/// Intensity splitting anatomy from expression
pub const DEFAULT_THRESHOLD: f32 = 256.0;

/// Shading of the expression regime
pub const EXPRESSION_SHADING: Shading = Shading {
    ambient: 1.0,
    diffuse: 0.7,
    specular: 0.5,
    specular_power: 10.0,
};

/// Builds the two fixed profiles of the composite volume.
///
/// Samples below `threshold` are anatomy, samples at or above are expression.
/// Profiles are plain data, building them never touches voxels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferFunctionClassifier {
    threshold: f32,
}

impl Default for TransferFunctionClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl TransferFunctionClassifier {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Black to warm yellow, opaque wherever there is tissue
    pub fn anatomical(&self) -> TransferFunctionProfile {
        let mut color = ColorTransferFunction::new();
        color.add_rgb_point(0.0, 0.0, 0.0, 0.0);
        color.add_rgb_point(50.0, 1.5, 1.5, 0.0);

        let scalar = PiecewiseFunction::from_points(&[(0.0, 40.0)]);
        let gradient = PiecewiseFunction::from_points(&[(250.0, 1.0)]);

        TransferFunctionProfile {
            kind: ProfileKind::Anatomical,
            range: IntensityRange::below(self.threshold),
            color,
            components: vec![OpacityComponent::new(scalar, Some(gradient))],
            interpolation: Interpolation::Linear,
            shading: None,
        }
    }

    /// Shaded red-magenta, opacity rising with expression level
    pub fn expression(&self) -> TransferFunctionProfile {
        let mut color = ColorTransferFunction::new();
        color.add_rgb_point(400.0, 1.0, 0.0, 0.3);

        let ramp = PiecewiseFunction::from_points(&[(70.0, 0.0), (250.0, 0.0), (4195.0, 40.0)]);
        let second = PiecewiseFunction::from_points(&[(100.0, 1.5)]);
        let gradient = PiecewiseFunction::from_points(&[(300.0, 1.0)]);

        TransferFunctionProfile {
            kind: ProfileKind::Expression,
            range: IntensityRange::at_least(self.threshold),
            color,
            components: vec![
                OpacityComponent::new(ramp, None),
                OpacityComponent::new(second, Some(gradient)),
            ],
            interpolation: Interpolation::Linear,
            shading: Some(EXPRESSION_SHADING),
        }
    }

    pub fn profiles(&self) -> [TransferFunctionProfile; 2] {
        [self.anatomical(), self.expression()]
    }

    /// Regime of a sample
    pub fn select(&self, sample: f32) -> ProfileKind {
        if sample < self.threshold {
            ProfileKind::Anatomical
        } else {
            ProfileKind::Expression
        }
    }

    /// Property holding both profiles
    pub fn volume_property(&self) -> VolumeProperty {
        let mut property = VolumeProperty::new();
        for profile in self.profiles() {
            property.add_profile(profile);
        }
        property.set_interpolation(Interpolation::Linear);
        property
    }
}
