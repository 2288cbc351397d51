use nalgebra::{point, Point3, Vector3};

use super::Ray;

/// Axis aligned box, bounds are inclusive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundBox {
    pub lower: Point3<f32>,
    pub upper: Point3<f32>,
}

impl BoundBox {
    pub fn new(lower: Point3<f32>, upper: Point3<f32>) -> BoundBox {
        BoundBox { lower, upper }
    }

    /// Box spanning sample positions of a grid with `dims` samples per axis.
    /// Samples sit on integer coordinates, so the box ends at `dims - 1`.
    pub fn from_grid_dims(dims: Vector3<usize>) -> BoundBox {
        let upper = dims.map(|d| d.saturating_sub(1) as f32);
        BoundBox {
            lower: point![0.0, 0.0, 0.0],
            upper: Point3::from(upper),
        }
    }

    pub fn dims(&self) -> Vector3<f32> {
        self.upper - self.lower
    }

    pub fn center(&self) -> Point3<f32> {
        self.lower + 0.5 * self.dims()
    }

    /// Radius of the bounding sphere
    pub fn radius(&self) -> f32 {
        0.5 * self.dims().magnitude()
    }

    pub fn contains(&self, pos: &Point3<f32>) -> bool {
        (0..3).all(|i| self.lower[i] <= pos[i] && pos[i] <= self.upper[i])
    }

    /// Parameters `(t_near, t_far)` of the segment of `ray` inside the box.
    /// `t_near` may be negative if the ray starts inside.
    pub fn intersect(&self, ray: &Ray) -> Option<(f32, f32)> {
        // Slab method, see Williams et al.: An Efficient and Robust Ray-Box Intersection Algorithm
        let t0 = (self.lower - ray.origin).component_div(&ray.direction);
        let t1 = (self.upper - ray.origin).component_div(&ray.direction);

        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        for axis in 0..3 {
            let (lo, hi) = if t0[axis] < t1[axis] {
                (t0[axis], t1[axis])
            } else {
                (t1[axis], t0[axis])
            };
            // NaN appears when the ray is parallel to the slab and starts on its border
            if !lo.is_nan() {
                t_near = t_near.max(lo);
            }
            if !hi.is_nan() {
                t_far = t_far.min(hi);
            }
        }

        // whole box is behind the ray origin
        if t_far < 0.0 || t_near > t_far {
            return None;
        }

        Some((t_near, t_far))
    }
}

/// Iterates the eight corners of a [`BoundBox`]
pub struct BoundBoxIterator {
    lower: Point3<f32>,
    upper: Point3<f32>,
    corner: u8,
}

impl Iterator for BoundBoxIterator {
    type Item = Point3<f32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.corner >= 8 {
            return None;
        }
        // bit i of the corner index picks lower/upper on axis i
        let pick = |axis: u8| {
            if self.corner & (1 << axis) == 0 {
                self.lower[axis as usize]
            } else {
                self.upper[axis as usize]
            }
        };
        let p = point![pick(0), pick(1), pick(2)];
        self.corner += 1;
        Some(p)
    }
}

impl IntoIterator for BoundBox {
    type Item = Point3<f32>;

    type IntoIter = BoundBoxIterator;

    fn into_iter(self) -> Self::IntoIter {
        BoundBoxIterator {
            lower: self.lower,
            upper: self.upper,
            corner: 0,
        }
    }
}

#[cfg(test)]
mod test {

    use nalgebra::vector;

    use super::*;

    fn unit_box() -> BoundBox {
        BoundBox::new(point![0.0, 0.0, 0.0], point![1.0, 1.0, 1.0])
    }

    #[test]
    fn grid_dims() {
        let bbox = BoundBox::from_grid_dims(vector![2, 3, 5]);
        assert_eq!(bbox.upper, point![1.0, 2.0, 4.0]);
        assert_eq!(bbox.center(), point![0.5, 1.0, 2.0]);
    }

    #[test]
    fn intersect_diagonal() {
        let ray = Ray::new(point![-1.0, -1.0, -1.0], vector![1.0, 1.0, 1.0].normalize());
        let (t0, t1) = unit_box().intersect(&ray).unwrap();
        assert!(t0 > 0.0);
        assert!((t1 - t0 - f32::sqrt(3.0)).abs() < 1e-5);
    }

    #[test]
    fn intersect_from_inside() {
        let ray = Ray::new(point![0.5, 0.5, 0.5], vector![1.0, 0.0, 0.0]);
        let (t0, t1) = unit_box().intersect(&ray).unwrap();
        assert!(t0 < 0.0);
        assert!((t1 - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn miss() {
        let ray = Ray::new(point![2.0, 2.0, 2.0], vector![0.0, 0.0, 1.0]);
        assert!(unit_box().intersect(&ray).is_none());
    }

    #[test]
    fn behind() {
        let ray = Ray::new(point![0.5, 0.5, 3.0], vector![0.0, 0.0, 1.0]);
        assert!(unit_box().intersect(&ray).is_none());
    }

    #[test]
    fn corners() {
        let corners: Vec<_> = unit_box().into_iter().collect();
        assert_eq!(corners.len(), 8);
        assert!(corners.contains(&point![1.0, 0.0, 1.0]));
        assert!(corners.contains(&point![0.0, 1.0, 1.0]));
        assert!(corners.iter().all(|c| unit_box().contains(c)));
    }
}
