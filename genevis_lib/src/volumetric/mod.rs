//! Scalar volumes and their combination
//!
//! [`ScalarVolume`] is the `u16` grid the rest of the crate works with.
//! [`VolumeCompositor`] sums an anatomical volume with an overlay.

mod compositor;
pub mod generate;
mod scalar_volume;
pub mod vol_reader;

pub use compositor::{CompositeVolume, OverflowPolicy, VolumeCompositor};
pub use scalar_volume::ScalarVolume;
pub use vol_reader::DataSource;
