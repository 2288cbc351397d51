use crate::color::{self, RGB};

/// Piecewise linear color ramp.
///
/// Same evaluation rules as [`PiecewiseFunction`](super::PiecewiseFunction),
/// applied per channel. An empty ramp is black.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorTransferFunction {
    points: Vec<(f32, RGB)>,
}

impl ColorTransferFunction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert color point, a point with the same `x` is replaced.
    /// Channels are stored as given and clamped on evaluation.
    pub fn add_rgb_point(&mut self, x: f32, r: f32, g: f32, b: f32) {
        let rgb = RGB::new(r, g, b);
        match self.points.binary_search_by(|p| p.0.total_cmp(&x)) {
            Ok(i) => self.points[i].1 = rgb,
            Err(i) => self.points.insert(i, (x, rgb)),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Color at `x`, every channel in `<0;1>`
    pub fn color(&self, x: f32) -> RGB {
        self.raw_color(x).map(color::clamp_unit)
    }

    fn raw_color(&self, x: f32) -> RGB {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return color::black(),
        };

        if x <= first.0 {
            return first.1;
        }
        if x >= last.0 {
            return last.1;
        }

        let hi = self.points.partition_point(|p| p.0 <= x);
        let (x0, c0) = self.points[hi - 1];
        let (x1, c1) = self.points[hi];
        let t = (x - x0) / (x1 - x0);
        c0.lerp(&c1, t)
    }
}
