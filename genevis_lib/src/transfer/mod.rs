//! Transfer functions
//!
//! Mapping from sample intensity and gradient magnitude to color and opacity.

mod classifier;
mod color_tf;
mod piecewise;
mod profile;
mod property;

pub use classifier::{TransferFunctionClassifier, DEFAULT_THRESHOLD, EXPRESSION_SHADING};
pub use color_tf::ColorTransferFunction;
pub use piecewise::PiecewiseFunction;
pub use profile::{Interpolation, OpacityComponent, ProfileKind, Shading, TransferFunctionProfile};
pub use property::{VolumeProperty, BACKGROUND_LIMIT};
