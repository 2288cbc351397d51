use nalgebra::Vector3;

use crate::color::{self, RGBA};

use super::{Interpolation, TransferFunctionProfile};

/// Samples below this round to intensity 0, which is background
pub const BACKGROUND_LIMIT: f32 = 0.5;

/// Set of profiles attached to a renderable volume.
///
/// A sample is classified by every profile whose range covers it,
/// the results are combined by per-channel maximum.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolumeProperty {
    profiles: Vec<TransferFunctionProfile>,
    interpolation: Interpolation,
}

impl VolumeProperty {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_profile(&mut self, profile: TransferFunctionProfile) {
        self.profiles.push(profile);
    }

    /// Drop every profile and keep only `profile`, adopting its interpolation
    pub fn set_profile(&mut self, profile: TransferFunctionProfile) {
        self.interpolation = profile.interpolation;
        self.profiles.clear();
        self.profiles.push(profile);
    }

    pub fn profiles(&self) -> &[TransferFunctionProfile] {
        &self.profiles
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.interpolation = interpolation;
    }

    /// Is any profile gradient-dependent
    pub fn uses_gradient(&self) -> bool {
        self.profiles.iter().any(|p| p.uses_gradient())
    }

    /// Color and opacity of a sample.
    /// Background and samples covered by no profile are transparent.
    pub fn classify(&self, sample: f32, gradient: &Vector3<f32>, light: &Vector3<f32>) -> RGBA {
        if sample < BACKGROUND_LIMIT {
            return color::zero();
        }

        self.profiles
            .iter()
            .filter(|p| p.covers(sample))
            .map(|p| p.classify(sample, gradient, light))
            .fold(color::zero(), |acc, c| color::max(&acc, &c))
    }
}
