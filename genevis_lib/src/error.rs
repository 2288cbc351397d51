//! Error types
//!
//! All errors are raised while the pipeline is being configured.
//! Nothing inside the render loop is recoverable.

use nalgebra::Vector3;
use thiserror::Error;

/// Shape of a volume as a plain array, for error messages
pub type Shape = [usize; 3];

pub fn shape_of(v: &Vector3<usize>) -> Shape {
    [v.x, v.y, v.z]
}

/// Errors raised while building, combining or reading volumes
#[derive(Debug, Error)]
pub enum VolumeError {
    #[error("volumes have different dimensions: {left:?} and {right:?}")]
    DimensionMismatch { left: Shape, right: Shape },

    #[error("volume {shape:?} needs {expected} samples, got {actual}")]
    DataLength {
        shape: Shape,
        expected: usize,
        actual: usize,
    },

    #[error("volume {0:?} has a zero-sized axis")]
    EmptyDimension(Shape),

    #[error("volume {0:?} is too large to address")]
    TooLarge(Shape),

    #[error("cannot parse volume: {0}")]
    Parse(&'static str),

    #[error("cannot read volume: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("extent {extent:?} describes {expected} samples, buffer has {actual}")]
    ExtentMismatch {
        extent: [usize; 6],
        expected: usize,
        actual: usize,
    },

    #[error("pipeline has no {0} attached")]
    PipelineIncomplete(&'static str),

    #[error("window: {0}")]
    Window(String),
}
