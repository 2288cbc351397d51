use nalgebra::Vector3;

use crate::{
    color::{self, RGBA},
    common::IntensityRange,
};

use super::{ColorTransferFunction, PiecewiseFunction};

/// Sampling of the volume between grid points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    Nearest,
    #[default]
    Linear,
}

/// Phong coefficients, evaluated with a headlight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shading {
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub specular_power: f32,
}

impl Shading {
    /// Shade `rgb` for surface with normal `normal` lit from `light`.
    /// Lighting is two-sided, both vectors are expected to be unit.
    pub fn apply(&self, rgb: &color::RGB, normal: &Vector3<f32>, light: &Vector3<f32>) -> color::RGB {
        let n_dot_l = normal.dot(light).abs();
        let diffuse = self.ambient + self.diffuse * n_dot_l;
        // viewer sits at the light, half vector is the light direction
        let specular = self.specular * n_dot_l.powf(self.specular_power);
        rgb.map(|c| color::clamp_unit(c * diffuse + specular))
    }
}

/// One opacity term: scalar opacity, optionally modulated by gradient magnitude
#[derive(Debug, Clone, PartialEq)]
pub struct OpacityComponent {
    pub scalar: PiecewiseFunction,
    pub gradient: Option<PiecewiseFunction>,
}

impl OpacityComponent {
    pub fn new(scalar: PiecewiseFunction, gradient: Option<PiecewiseFunction>) -> Self {
        Self { scalar, gradient }
    }

    pub fn opacity(&self, sample: f32, gradient_magnitude: f32) -> f32 {
        let scalar = self.scalar.unit_value(sample);
        match &self.gradient {
            Some(g) => scalar * g.unit_value(gradient_magnitude),
            None => scalar,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    Anatomical,
    Expression,
}

impl ProfileKind {
    pub fn name(&self) -> &'static str {
        match self {
            ProfileKind::Anatomical => "anatomical",
            ProfileKind::Expression => "expression",
        }
    }
}

/// Visual encoding of one intensity regime
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunctionProfile {
    pub kind: ProfileKind,
    /// Intensities the profile applies to
    pub range: IntensityRange,
    pub color: ColorTransferFunction,
    /// Multiplied together
    pub components: Vec<OpacityComponent>,
    pub interpolation: Interpolation,
    /// `None` means unshaded
    pub shading: Option<Shading>,
}

impl TransferFunctionProfile {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn covers(&self, sample: f32) -> bool {
        self.range.contains(sample)
    }

    /// Does classification depend on the gradient
    pub fn uses_gradient(&self) -> bool {
        self.shading.is_some() || self.components.iter().any(|c| c.gradient.is_some())
    }

    pub fn opacity(&self, sample: f32, gradient_magnitude: f32) -> f32 {
        self.components
            .iter()
            .map(|c| c.opacity(sample, gradient_magnitude))
            .product()
    }

    /// Color and opacity of a sample, ignoring [`range`](Self::range)
    ///
    /// # Arguments
    ///
    /// * `sample` - intensity
    /// * `gradient` - intensity gradient at the sample, zero if unknown
    /// * `light` - unit direction towards the light
    pub fn classify(&self, sample: f32, gradient: &Vector3<f32>, light: &Vector3<f32>) -> RGBA {
        let magnitude = gradient.magnitude();
        let opacity = self.opacity(sample, magnitude);
        if opacity == 0.0 {
            return color::zero();
        }

        let rgb = self.color.color(sample);
        let rgb = match &self.shading {
            Some(shading) if magnitude > 0.0 => shading.apply(&rgb, &(gradient / magnitude), light),
            _ => rgb,
        };
        color::with_opacity(rgb, opacity)
    }
}
