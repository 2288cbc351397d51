//! Clip planes
//!
//! A plane keeps the half-space its normal points into.
//! Interaction widgets implement [`PlaneSource`], the mapper owns a [`ClippingState`].

use nalgebra::{Point3, Vector3};

use crate::common::{BoundBox, Ray};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub origin: Point3<f32>,
    /// Unit, points into the kept half-space
    pub normal: Vector3<f32>,
}

impl Plane {
    pub fn new(origin: Point3<f32>, normal: Vector3<f32>) -> Plane {
        Plane {
            origin,
            normal: normal.normalize(),
        }
    }

    /// Positive on the kept side
    pub fn signed_distance(&self, point: &Point3<f32>) -> f32 {
        (point - self.origin).dot(&self.normal)
    }
}

/// Ordered list of planes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaneSet {
    planes: Vec<Plane>,
}

impl PlaneSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, plane: Plane) {
        self.planes.push(plane);
    }

    pub fn clear(&mut self) {
        self.planes.clear();
    }

    pub fn len(&self) -> usize {
        self.planes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Plane> {
        self.planes.iter()
    }
}

impl FromIterator<Plane> for PlaneSet {
    fn from_iter<I: IntoIterator<Item = Plane>>(iter: I) -> Self {
        PlaneSet {
            planes: iter.into_iter().collect(),
        }
    }
}

/// Anything that can report a set of clip planes
pub trait PlaneSource {
    /// Overwrite `planes` with the current planes
    fn get_planes(&self, planes: &mut PlaneSet);
}

impl PlaneSource for PlaneSet {
    fn get_planes(&self, planes: &mut PlaneSet) {
        planes.clone_from(self);
    }
}

/// Clip planes applied to rays before sampling
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClippingState {
    planes: PlaneSet,
}

impl ClippingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the clip list
    pub fn set_planes(&mut self, planes: &PlaneSet) {
        self.planes.clone_from(planes);
    }

    pub fn planes(&self) -> &PlaneSet {
        &self.planes
    }

    pub fn clear(&mut self) {
        self.planes.clear();
    }

    /// Is `point` removed by any plane
    pub fn is_clipped(&self, point: &Point3<f32>) -> bool {
        self.planes.iter().any(|p| p.signed_distance(point) < 0.0)
    }

    /// Restrict ray segment `<t_near;t_far>` to the kept region.
    /// `None` if nothing of the segment survives.
    pub fn clip_segment(&self, ray: &Ray, t_near: f32, t_far: f32) -> Option<(f32, f32)> {
        let (mut t0, mut t1) = (t_near, t_far);

        for plane in self.planes.iter() {
            let start = plane.signed_distance(&ray.origin);
            let speed = ray.direction.dot(&plane.normal);

            if speed == 0.0 {
                if start < 0.0 {
                    return None;
                }
                continue;
            }

            let t_cross = -start / speed;
            if speed > 0.0 {
                t0 = t0.max(t_cross);
            } else {
                t1 = t1.min(t_cross);
            }
        }

        if t0 > t1 {
            return None;
        }
        Some((t0, t1))
    }
}

/// Face of a box along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Lower,
    Upper,
}

/// Axis aligned clip box, the six faces are the clip planes.
///
/// Faces move inside the bounds the widget was placed on.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxWidget {
    placed: BoundBox,
    current: BoundBox,
}

impl BoxWidget {
    pub fn new(placed: BoundBox) -> BoxWidget {
        BoxWidget {
            placed,
            current: placed,
        }
    }

    pub fn bounds(&self) -> BoundBox {
        self.current
    }

    /// Back to the placement bounds
    pub fn reset(&mut self) {
        self.current = self.placed;
    }

    pub fn is_reset(&self) -> bool {
        self.current == self.placed
    }

    /// Move a face inwards by `amount` (outwards if negative).
    /// Faces never leave the placement bounds or cross each other.
    pub fn push_face(&mut self, axis: usize, face: Face, amount: f32) {
        if axis > 2 {
            return;
        }
        let lower = self.current.lower[axis];
        let upper = self.current.upper[axis];
        match face {
            Face::Lower => {
                self.current.lower[axis] = (lower + amount).clamp(self.placed.lower[axis], upper);
            }
            Face::Upper => {
                self.current.upper[axis] = (upper - amount).clamp(lower, self.placed.upper[axis]);
            }
        }
    }
}

impl PlaneSource for BoxWidget {
    fn get_planes(&self, planes: &mut PlaneSet) {
        planes.clear();
        for axis in 0..3 {
            let mut normal = Vector3::zeros();
            normal[axis] = 1.0;
            planes.push(Plane::new(self.current.lower, normal));
            planes.push(Plane::new(self.current.upper, -normal));
        }
    }
}

#[cfg(test)]
mod test {

    use nalgebra::{point, vector};

    use super::*;

    fn x_ray() -> Ray {
        Ray::new(point![-5.0, 0.5, 0.5], vector![1.0, 0.0, 0.0])
    }

    #[test]
    fn no_planes_keeps_segment() {
        let clip = ClippingState::new();
        assert_eq!(clip.clip_segment(&x_ray(), 1.0, 4.0), Some((1.0, 4.0)));
        assert!(!clip.is_clipped(&point![100.0, 0.0, 0.0]));
    }

    #[test]
    fn half_space() {
        let mut clip = ClippingState::new();
        let planes: PlaneSet = [Plane::new(point![0.0, 0.0, 0.0], vector![1.0, 0.0, 0.0])]
            .into_iter()
            .collect();
        clip.set_planes(&planes);

        assert_eq!(clip.clip_segment(&x_ray(), 0.0, 10.0), Some((5.0, 10.0)));
        assert!(clip.is_clipped(&point![-1.0, 0.0, 0.0]));
        assert!(!clip.is_clipped(&point![1.0, 0.0, 0.0]));
    }

    #[test]
    fn parallel_plane() {
        let mut clip = ClippingState::new();
        let mut planes = PlaneSet::new();
        planes.push(Plane::new(point![0.0, 1.0, 0.0], vector![0.0, 1.0, 0.0]));
        clip.set_planes(&planes);

        // ray runs at y = 0.5, below the kept region
        assert_eq!(clip.clip_segment(&x_ray(), 0.0, 10.0), None);
    }

    #[test]
    fn set_twice_is_idempotent() {
        let widget = BoxWidget::new(BoundBox::from_grid_dims(vector![10, 10, 10]));
        let mut planes = PlaneSet::new();
        widget.get_planes(&mut planes);

        let mut clip = ClippingState::new();
        clip.set_planes(&planes);
        let once = clip.clone();
        clip.set_planes(&planes);

        assert_eq!(clip, once);
        assert_eq!(clip.planes().len(), 6);
    }

    mod box_widget {

        use super::*;

        #[test]
        fn planes_bound_the_box() {
            let mut widget = BoxWidget::new(BoundBox::from_grid_dims(vector![10, 10, 10]));
            widget.push_face(0, Face::Lower, 3.0);
            widget.push_face(2, Face::Upper, 4.0);

            let mut planes = PlaneSet::new();
            widget.get_planes(&mut planes);
            let mut clip = ClippingState::new();
            clip.set_planes(&planes);

            assert!(clip.is_clipped(&point![2.0, 5.0, 5.0]));
            assert!(!clip.is_clipped(&point![3.0, 5.0, 5.0]));
            assert!(clip.is_clipped(&point![5.0, 5.0, 6.0]));
            assert!(!clip.is_clipped(&point![5.0, 5.0, 5.0]));
        }

        #[test]
        fn faces_stay_inside() {
            let placed = BoundBox::from_grid_dims(vector![10, 10, 10]);
            let mut widget = BoxWidget::new(placed);

            widget.push_face(1, Face::Lower, -5.0);
            assert_eq!(widget.bounds(), placed);

            widget.push_face(1, Face::Lower, 20.0);
            assert_eq!(widget.bounds().lower.y, 9.0);
            widget.push_face(1, Face::Upper, 20.0);
            assert_eq!(widget.bounds().upper.y, 9.0);

            widget.reset();
            assert!(widget.is_reset());
        }

        #[test]
        fn collapsed_box_clips_everything() {
            let mut widget = BoxWidget::new(BoundBox::from_grid_dims(vector![4, 4, 4]));
            widget.push_face(0, Face::Lower, 3.0);
            widget.push_face(0, Face::Upper, 3.0);

            let mut planes = PlaneSet::new();
            widget.get_planes(&mut planes);
            // plane pair coincides at x = 3, only that slab is kept
            let mut clip = ClippingState::new();
            clip.set_planes(&planes);
            assert!(clip.is_clipped(&point![2.0, 1.0, 1.0]));
        }
    }
}
