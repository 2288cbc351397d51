/// Piecewise linear function of one variable.
///
/// Outside of the control points the function is clamped to the value
/// of the nearest point. A function without points is zero everywhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PiecewiseFunction {
    /// Control points, sorted by `x`
    points: Vec<(f32, f32)>,
}

impl PiecewiseFunction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(x, y)` pairs in any order
    pub fn from_points(points: &[(f32, f32)]) -> Self {
        let mut f = Self::new();
        for &(x, y) in points {
            f.add_point(x, y);
        }
        f
    }

    /// Insert control point, a point with the same `x` is replaced
    pub fn add_point(&mut self, x: f32, y: f32) {
        match self.points.binary_search_by(|p| p.0.total_cmp(&x)) {
            Ok(i) => self.points[i].1 = y,
            Err(i) => self.points.insert(i, (x, y)),
        }
    }

    pub fn points(&self) -> &[(f32, f32)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn value(&self, x: f32) -> f32 {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(f), Some(l)) => (*f, *l),
            _ => return 0.0,
        };

        if x <= first.0 {
            return first.1;
        }
        if x >= last.0 {
            return last.1;
        }

        // first point with p.x > x, exists since x < last.x
        let hi = self.points.partition_point(|p| p.0 <= x);
        let (x0, y0) = self.points[hi - 1];
        let (x1, y1) = self.points[hi];
        let t = (x - x0) / (x1 - x0);
        y0 + t * (y1 - y0)
    }

    /// Value clamped into `<0;1>`, for opacities
    pub fn unit_value(&self, x: f32) -> f32 {
        self.value(x).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn empty_is_zero() {
        let f = PiecewiseFunction::new();
        assert_eq!(f.value(-5.0), 0.0);
        assert_eq!(f.value(100.0), 0.0);
    }

    #[test]
    fn single_point_is_constant() {
        let f = PiecewiseFunction::from_points(&[(250.0, 1.0)]);
        assert_eq!(f.value(0.0), 1.0);
        assert_eq!(f.value(250.0), 1.0);
        assert_eq!(f.value(1e6), 1.0);
    }

    #[test]
    fn interpolates() {
        let f = PiecewiseFunction::from_points(&[(250.0, 0.0), (70.0, 0.0), (4195.0, 40.0)]);

        assert_eq!(f.points()[0].0, 70.0);
        assert_eq!(f.value(100.0), 0.0);
        assert_eq!(f.value(250.0), 0.0);
        assert!((f.value(2222.5) - 20.0).abs() < 1e-3);
        assert_eq!(f.value(5000.0), 40.0);
    }

    #[test]
    fn unit_value_clamps() {
        let f = PiecewiseFunction::from_points(&[(0.0, 40.0)]);
        assert_eq!(f.value(10.0), 40.0);
        assert_eq!(f.unit_value(10.0), 1.0);

        let f = PiecewiseFunction::from_points(&[(0.0, -2.0)]);
        assert_eq!(f.unit_value(10.0), 0.0);
    }

    #[test]
    fn replace_point() {
        let mut f = PiecewiseFunction::new();
        f.add_point(10.0, 0.5);
        f.add_point(10.0, 0.25);
        assert_eq!(f.len(), 1);
        assert_eq!(f.value(10.0), 0.25);
    }
}
