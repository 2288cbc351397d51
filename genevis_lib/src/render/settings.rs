use nalgebra::vector;

use crate::{
    color::RGB,
    interaction::InteractionController,
    transfer::{TransferFunctionClassifier, DEFAULT_THRESHOLD},
    volumetric::{OverflowPolicy, VolumeCompositor},
};

use super::{BlendMode, RayCastMapper, WindowState};

pub const DEFAULT_SAMPLE_DISTANCE: f32 = 0.1;
pub const DEFAULT_INTERACTIVE_FACTOR: f32 = 4.0;
pub const DEFAULT_WINDOW_SIZE: (usize, usize) = (700, 700);
pub const DEFAULT_INTERACTIVE_UPDATE_RATE: f32 = 10.0;
pub const DEFAULT_STILL_UPDATE_RATE: f32 = 0.001;
pub const DEFAULT_TITLE: &str = "genevis";

/// Everything configurable about a rendering session
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    /// Intensity separating the anatomical and expression regimes
    pub threshold: f32,
    /// Full quality distance between samples along a ray, in voxels
    pub sample_distance: f32,
    /// Sample distance multiplier used while interacting
    pub interactive_factor: f32,
    pub window_size: (usize, usize),
    pub background: RGB,
    pub interactive_update_rate: f32,
    pub still_update_rate: f32,
    pub blend_mode: BlendMode,
    pub adaptive_sampling: bool,
    pub overflow: OverflowPolicy,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            sample_distance: DEFAULT_SAMPLE_DISTANCE,
            interactive_factor: DEFAULT_INTERACTIVE_FACTOR,
            window_size: DEFAULT_WINDOW_SIZE,
            background: vector![0.0, 0.0, 0.0],
            interactive_update_rate: DEFAULT_INTERACTIVE_UPDATE_RATE,
            still_update_rate: DEFAULT_STILL_UPDATE_RATE,
            blend_mode: BlendMode::default(),
            adaptive_sampling: false,
            overflow: OverflowPolicy::default(),
        }
    }
}

impl RenderSettings {
    pub fn compositor(&self) -> VolumeCompositor {
        VolumeCompositor::new(self.overflow)
    }

    pub fn classifier(&self) -> TransferFunctionClassifier {
        TransferFunctionClassifier::new(self.threshold)
    }

    pub fn mapper(&self) -> RayCastMapper {
        let mut mapper =
            RayCastMapper::new(self.blend_mode, self.sample_distance, self.adaptive_sampling);
        mapper.set_interactive_factor(self.interactive_factor);
        mapper
    }

    /// Window starts at the still rate
    pub fn window_state(&self) -> WindowState {
        WindowState {
            size: self.window_size,
            background: self.background,
            desired_update_rate: self.still_update_rate,
            title: DEFAULT_TITLE.to_string(),
        }
    }

    pub fn controller(&self) -> InteractionController {
        InteractionController::with_rates(self.interactive_update_rate, self.still_update_rate)
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn defaults() {
        let settings = RenderSettings::default();
        assert_eq!(settings.threshold, 256.0);
        assert_eq!(settings.sample_distance, 0.1);
        assert_eq!(settings.window_size, (700, 700));
        assert_eq!(settings.background, vector![0.0, 0.0, 0.0]);
        assert_eq!(settings.blend_mode, BlendMode::MaximumIntensity);
        assert!(!settings.adaptive_sampling);
        assert_eq!(settings.overflow, OverflowPolicy::Saturate);
    }

    #[test]
    fn builds_parts() {
        let settings = RenderSettings {
            threshold: 300.0,
            sample_distance: 0.5,
            interactive_factor: 2.0,
            ..Default::default()
        };

        assert_eq!(settings.classifier().threshold(), 300.0);

        let mapper = settings.mapper();
        assert_eq!(mapper.sample_distance(), 0.5);
        assert_eq!(mapper.interactive_sample_distance(), 1.0);

        let window = settings.window_state();
        assert_eq!(window.size, (700, 700));
        assert_eq!(window.desired_update_rate, 0.001);
    }
}
