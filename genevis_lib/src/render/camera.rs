use nalgebra::{point, vector, Point3, Rotation3, Unit, Vector2, Vector3};

use crate::common::{BoundBox, Ray, ViewportBox};

/// Vertical field of view in degrees
pub const DEFAULT_FOV_Y: f32 = 30.0;

/// Elevation stops this close (in radians) to the poles
const POLE_MARGIN: f32 = 0.05;

/// Ray-casting camera looking at a target point.
///
/// World up is the positive y axis.
/// Pixel `[0,0]` is the upper left corner of the image plane.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    position: Point3<f32>,
    target: Point3<f32>,
    /// Unit, from position to target
    direction: Vector3<f32>,
    up: Vector3<f32>,
    right: Vector3<f32>,
    aspect: f32,
    /// Vertical Field of View in degrees
    fov_y: f32,
    img_plane_size: Vector2<f32>,
    /// Direction of ray passing through pixel `[0,0]`
    dir_00: Vector3<f32>,
    /// Offset between horizontally neighbouring image plane edges
    du: Vector3<f32>,
    /// Offset between vertically neighbouring image plane edges, points down
    dv: Vector3<f32>,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(point![0.0, 0.0, 1.0], point![0.0, 0.0, 0.0])
    }
}

impl PerspectiveCamera {
    /// Camera at `position` looking at `target`.
    /// FoV is [`DEFAULT_FOV_Y`], aspect ratio is 1.
    pub fn new(position: Point3<f32>, target: Point3<f32>) -> PerspectiveCamera {
        let mut camera = PerspectiveCamera {
            position,
            target,
            direction: vector![0.0, 0.0, -1.0],
            up: vector![0.0, 1.0, 0.0],
            right: vector![1.0, 0.0, 0.0],
            aspect: 1.0,
            fov_y: DEFAULT_FOV_Y,
            img_plane_size: vector![1.0, 1.0],
            dir_00: Vector3::zeros(),
            du: Vector3::zeros(),
            dv: Vector3::zeros(),
        };
        camera.recalc_plane_size();
        camera.recalc_plane();
        camera
    }

    pub fn change_aspect_from_resolution(&mut self, width: usize, height: usize) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
        self.recalc_plane_size();
        self.recalc_dudv();
    }

    pub fn change_fov(&mut self, vertical_fov_deg: f32) {
        self.fov_y = vertical_fov_deg.clamp(1.0, 179.0);
        self.recalc_plane_size();
        self.recalc_dudv();
    }

    pub fn set_position(&mut self, position: Point3<f32>) {
        self.position = position;
        self.recalc_plane();
    }

    pub fn set_target(&mut self, target: Point3<f32>) {
        self.target = target;
        self.recalc_plane();
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn target(&self) -> Point3<f32> {
        self.target
    }

    pub fn direction(&self) -> Vector3<f32> {
        self.direction
    }

    pub fn distance(&self) -> f32 {
        (self.target - self.position).magnitude()
    }

    /// Rotate position around the target
    ///
    /// # Arguments
    ///
    /// * `azimuth` - degrees around the world up axis
    /// * `elevation` - degrees around the camera right axis, stops short of the poles
    pub fn orbit(&mut self, azimuth: f32, elevation: f32) {
        let offset = self.position - self.target;

        let around_up = Rotation3::from_axis_angle(&Vector3::y_axis(), azimuth.to_radians());
        let mut offset = around_up * offset;

        let right = Unit::new_normalize(around_up * self.right);
        let elevated = Rotation3::from_axis_angle(&right, elevation.to_radians()) * offset;
        let polar = elevated.normalize().dot(&Vector3::y()).abs().min(1.0).acos();
        let same_side = elevated.xz().dot(&offset.xz()) > 0.0;
        if polar > POLE_MARGIN && same_side {
            offset = elevated;
        }

        self.position = self.target + offset;
        self.recalc_plane();
    }

    /// Move towards the target, `factor > 1` gets closer
    pub fn zoom(&mut self, factor: f32) {
        if factor <= 0.0 {
            return;
        }
        let offset = (self.position - self.target) / factor;
        self.position = self.target + offset;
    }

    /// Aim at the center of `bound_box` from a distance where the whole box fits,
    /// keeping the viewing direction
    pub fn reset_to_box(&mut self, bound_box: &BoundBox) {
        let center = bound_box.center();
        let radius = bound_box.radius().max(0.5);
        let half_angle = (0.5 * self.fov_y).to_radians();
        let distance = radius / half_angle.sin();

        self.target = center;
        self.position = center - self.direction * distance;
        self.recalc_plane();
    }

    fn recalc_plane(&mut self) {
        let direction = self.target - self.position;
        if direction.magnitude() > f32::EPSILON {
            self.direction = direction.normalize();
        }
        self.recalc_up_right();
        self.recalc_dudv();
    }

    fn recalc_up_right(&mut self) {
        let world_up = Vector3::y();
        let right = self.direction.cross(&world_up);
        // looking straight up or down, keep the old right vector
        if right.magnitude() > 1e-6 {
            self.right = right.normalize();
        }
        self.up = self.right.cross(&self.direction).normalize();
    }

    fn recalc_plane_size(&mut self) {
        let height = 2.0 * f32::tan(f32::to_radians(0.5 * self.fov_y));
        self.img_plane_size = vector![height * self.aspect, height];
    }

    fn recalc_dudv(&mut self) {
        self.du = self.img_plane_size.x * self.right;
        self.dv = -self.img_plane_size.y * self.up;
        self.dir_00 = self.direction - 0.5 * self.du - 0.5 * self.dv;
    }

    /// Ray from the camera through the image plane at `pixel_coord`
    ///
    /// # Arguments
    ///
    /// * `pixel_coord` - coordinates in `<0;1>x<0;1>`, `[0,0]` being the upper left corner
    pub fn get_ray(&self, pixel_coord: (f32, f32)) -> Ray {
        let dir = self.dir_00 + self.du * pixel_coord.0 + self.dv * pixel_coord.1;
        Ray::new(self.position, dir.normalize())
    }

    /// Smallest viewport rectangle covering the projection of `bound_box`.
    ///
    /// If any corner is behind the camera the whole image is returned.
    pub fn project_box(&self, bound_box: BoundBox) -> ViewportBox {
        let mut viewbox = ViewportBox::new();

        let dun = self.right / self.img_plane_size.x;
        let dvn = -self.up / self.img_plane_size.y;

        for corner in bound_box {
            let v = corner - self.position;
            let depth = v.dot(&self.direction);
            if depth <= f32::EPSILON {
                return ViewportBox::full();
            }
            // point on the image plane at distance 1
            let on_plane = v / depth - self.dir_00;
            viewbox.add_point(on_plane.dot(&dun), on_plane.dot(&dvn));
        }

        viewbox
    }
}
