//! Ray-cast rendering
//!
//! [`RenderPipeline`] ties the imported image, the [`RayCastMapper`],
//! the volume property and a [`RenderWindow`] together.

mod camera;
mod clipping;
mod frame;
mod image_import;
mod mapper;
mod pipeline;
mod settings;
mod window;

pub use camera::{PerspectiveCamera, DEFAULT_FOV_Y};
pub use clipping::{BoxWidget, ClippingState, Face, Plane, PlaneSet, PlaneSource};
pub use frame::FrameBuffer;
pub use image_import::{Extent, ImageData, ImageImport};
pub use mapper::{
    BlendMode, RayCastMapper, RenderQuality, RenderReport, RAY_TERMINATION_OPACITY,
    STILL_RATE_THRESHOLD,
};
pub use pipeline::{RenderPipeline, RenderableVolume};
pub use settings::*;
pub use window::{HeadlessWindow, RenderWindow, WindowState};
