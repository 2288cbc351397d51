mod bound_box;
mod intensity_range;
mod ray;
mod viewport_box;

pub use bound_box::{BoundBox, BoundBoxIterator};
pub use intensity_range::IntensityRange;
pub use ray::Ray;
pub use viewport_box::ViewportBox;
