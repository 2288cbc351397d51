//! # genevis_lib
//!
//! Direct volume rendering of an anatomical MRI volume combined with a
//! gene-expression overlay.
//!
//! The crate is split by the stages of the pipeline:
//!
//! * [`volumetric`] - scalar volumes, compositing of two sources, `.vol` input
//! * [`transfer`] - piecewise transfer functions and the two intensity-regime profiles
//! * [`render`] - image import, ray-cast mapper, camera, window abstraction and the pipeline
//! * [`interaction`] - quality and clip-plane control driven by interaction events
//!
//! Everything runs on the calling thread, rendering is synchronous.

pub mod common;
pub mod error;
pub mod interaction;
pub mod render;
pub mod test_helpers;
pub mod transfer;
pub mod volumetric;

pub use error::{RenderError, VolumeError};
pub use interaction::{InteractionContext, InteractionController, InteractionEvent};
pub use render::{PerspectiveCamera, RenderPipeline, RenderSettings};
pub use transfer::{TransferFunctionClassifier, VolumeProperty};
pub use volumetric::{CompositeVolume, OverflowPolicy, ScalarVolume, VolumeCompositor};

/// Colors with channels in range `<0;1>`.
/// Opacity is stored in the `w` component.
pub mod color {
    use nalgebra::{vector, Vector3, Vector4};

    pub type RGBA = Vector4<f32>;
    pub type RGB = Vector3<f32>;

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> RGBA {
        vector![r, g, b, a]
    }

    pub fn zero() -> RGBA {
        vector![0.0, 0.0, 0.0, 0.0]
    }

    pub fn mono(v: f32, opacity: f32) -> RGBA {
        vector![v, v, v, opacity]
    }

    pub fn black() -> RGB {
        vector![0.0, 0.0, 0.0]
    }

    pub fn with_opacity(rgb: RGB, opacity: f32) -> RGBA {
        vector![rgb.x, rgb.y, rgb.z, opacity]
    }

    /// Per channel maximum of two colors
    pub fn max(a: &RGBA, b: &RGBA) -> RGBA {
        a.zip_map(b, f32::max)
    }

    pub fn clamp_unit(v: f32) -> f32 {
        v.clamp(0.0, 1.0)
    }
}
