//! # Default values
//!
//! Used as initial values when the command line leaves them out.
//! Rendering defaults live in [`genevis_lib::render::RenderSettings`].

use nalgebra::{vector, Vector3};

/// Shape of the generated head phantom
pub const PHANTOM_DIMS: Vector3<usize> = vector![96, 96, 96];

/// Value of the constant expression overlay
pub const OVERLAY_VALUE: u16 = 145;

// Camera
pub const ORBIT_DEGREES_PER_PIXEL: f32 = 0.4;
pub const ZOOM_STEP: f32 = 1.1;

/// How far one key press moves a clip box face, in voxels
pub const CLIP_STEP: f32 = 2.0;

/// Upper bound of the window event rate
pub const POLL_INTERVAL_MS: u64 = 16;
