use std::{cmp::min, ops::Range};

use nalgebra::{point, Point2, Vector2};

/// Rectangle on the image plane, coordinates in `<0;1>`
#[derive(Debug, Clone, Copy)]
pub struct ViewportBox {
    pub lower: Point2<f32>,
    pub upper: Point2<f32>,
}

impl ViewportBox {
    /// Empty viewport, flipped bounds so any point extends it
    pub fn new() -> Self {
        Self {
            lower: point![f32::INFINITY, f32::INFINITY],
            upper: point![f32::NEG_INFINITY, f32::NEG_INFINITY],
        }
    }

    /// Viewport covering the whole image
    pub fn full() -> Self {
        Self {
            lower: point![0.0, 0.0],
            upper: point![1.0, 1.0],
        }
    }

    pub fn add_point(&mut self, x: f32, y: f32) {
        self.upper.x = f32::max(self.upper.x, x);
        self.upper.y = f32::max(self.upper.y, y);
        self.lower.x = f32::min(self.lower.x, x);
        self.lower.y = f32::min(self.lower.y, y);
    }

    pub fn size(&self) -> Vector2<f32> {
        self.upper - self.lower
    }

    /// Pixels covered by the viewport, clamped to the image
    pub fn get_pixel_range(&self, resolution: (usize, usize)) -> (Range<usize>, Range<usize>) {
        let (width, height) = resolution;
        let to_pixels = |lo: f32, hi: f32, len: usize| {
            let len_f = len as f32;
            let start = f32::floor(lo.max(0.0) * len_f) as usize;
            let end = f32::ceil(hi.min(1.0) * len_f).max(0.0) as usize;
            let start = min(start, len);
            start..min(end.max(start), len)
        };

        (
            to_pixels(self.lower.x, self.upper.x, width),
            to_pixels(self.lower.y, self.upper.y, height),
        )
    }
}

impl Default for ViewportBox {
    fn default() -> Self {
        Self::new()
    }
}
