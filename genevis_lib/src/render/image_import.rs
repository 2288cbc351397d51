use log::debug;
use nalgebra::{vector, Point3, Vector3};

use crate::{
    common::BoundBox, error::RenderError, transfer::Interpolation, volumetric::CompositeVolume,
};

/// Zero-based inclusive index bounds `[x0, x1, y0, y1, z0, z1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub bounds: [usize; 6],
}

impl Extent {
    pub fn new(bounds: [usize; 6]) -> Extent {
        Extent { bounds }
    }

    /// Extent of a volume with shape `(w, d, h)`: `[0, h-1, 0, d-1, 0, w-1]`.
    ///
    /// The fastest varying axis of the volume becomes the image x axis.
    pub fn from_shape(shape: Vector3<usize>) -> Extent {
        Extent {
            bounds: [
                0,
                shape.z.saturating_sub(1),
                0,
                shape.y.saturating_sub(1),
                0,
                shape.x.saturating_sub(1),
            ],
        }
    }

    /// Samples along each image axis, zero if the bounds are inverted
    pub fn dims(&self) -> Vector3<usize> {
        let b = &self.bounds;
        let axis = |lo: usize, hi: usize| if hi < lo { 0 } else { hi - lo + 1 };
        vector![axis(b[0], b[1]), axis(b[2], b[3]), axis(b[4], b[5])]
    }

    pub fn voxel_count(&self) -> usize {
        self.dims().iter().product()
    }
}

/// Imported image, x varies fastest.
/// Samples sit on integer coordinates `<0;n-1>` of each axis.
#[derive(Clone, PartialEq)]
pub struct ImageData {
    dims: Vector3<usize>,
    data: Vec<u16>,
}

impl std::fmt::Debug for ImageData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageData")
            .field("dims", &[self.dims.x, self.dims.y, self.dims.z])
            .finish()
    }
}

// lower index, upper index and weight of the upper one
fn axis_cell(pos: f32, len: usize) -> (usize, usize, f32) {
    let last = len.saturating_sub(1);
    let pos = pos.clamp(0.0, last as f32);
    let lo = (pos.floor() as usize).min(last);
    let hi = (lo + 1).min(last);
    (lo, hi, pos - lo as f32)
}

impl ImageData {
    pub fn dims(&self) -> Vector3<usize> {
        self.dims
    }

    pub fn data(&self) -> &[u16] {
        &self.data
    }

    pub fn bound_box(&self) -> BoundBox {
        BoundBox::from_grid_dims(self.dims)
    }

    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.dims.x + z * self.dims.x * self.dims.y
    }

    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<u16> {
        if x >= self.dims.x || y >= self.dims.y || z >= self.dims.z {
            return None;
        }
        self.data.get(self.index(x, y, z)).copied()
    }

    pub fn sample(&self, pos: &Point3<f32>, interpolation: Interpolation) -> f32 {
        match interpolation {
            Interpolation::Nearest => self.sample_nearest(pos),
            Interpolation::Linear => self.sample_linear(pos),
        }
    }

    /// Closest grid sample, positions outside are clamped to the border
    pub fn sample_nearest(&self, pos: &Point3<f32>) -> f32 {
        let idx = |p: f32, len: usize| (p.round().max(0.0) as usize).min(len.saturating_sub(1));
        let (x, y, z) = (
            idx(pos.x, self.dims.x),
            idx(pos.y, self.dims.y),
            idx(pos.z, self.dims.z),
        );
        self.data[self.index(x, y, z)] as f32
    }

    /// Trilinear interpolation, positions outside are clamped to the border
    pub fn sample_linear(&self, pos: &Point3<f32>) -> f32 {
        let (x0, x1, tx) = axis_cell(pos.x, self.dims.x);
        let (y0, y1, ty) = axis_cell(pos.y, self.dims.y);
        let (z0, z1, tz) = axis_cell(pos.z, self.dims.z);

        let at = |x, y, z| self.data[self.index(x, y, z)] as f32;
        let lerp = |a: f32, b: f32, t: f32| a + t * (b - a);

        let c00 = lerp(at(x0, y0, z0), at(x1, y0, z0), tx);
        let c10 = lerp(at(x0, y1, z0), at(x1, y1, z0), tx);
        let c01 = lerp(at(x0, y0, z1), at(x1, y0, z1), tx);
        let c11 = lerp(at(x0, y1, z1), at(x1, y1, z1), tx);

        let c0 = lerp(c00, c10, ty);
        let c1 = lerp(c01, c11, ty);
        lerp(c0, c1, tz)
    }

    /// Central differences with a step of one voxel
    pub fn gradient(&self, pos: &Point3<f32>, interpolation: Interpolation) -> Vector3<f32> {
        let mut grad = Vector3::zeros();
        for axis in 0..3 {
            let mut step = Vector3::zeros();
            step[axis] = 1.0;
            let ahead = self.sample(&(pos + step), interpolation);
            let behind = self.sample(&(pos - step), interpolation);
            grad[axis] = 0.5 * (ahead - behind);
        }
        grad
    }
}

/// Turns a raw buffer into [`ImageData`] described by an [`Extent`]
#[derive(Debug, Clone)]
pub struct ImageImport {
    extent: Extent,
    image: ImageData,
}

impl ImageImport {
    /// Wrap `raw`, its length must match the extent
    pub fn new(raw: Vec<u16>, extent: Extent) -> Result<ImageImport, RenderError> {
        let expected = extent.voxel_count();
        if expected == 0 || raw.len() != expected {
            return Err(RenderError::ExtentMismatch {
                extent: extent.bounds,
                expected,
                actual: raw.len(),
            });
        }

        Ok(ImageImport {
            extent,
            image: ImageData {
                dims: extent.dims(),
                data: raw,
            },
        })
    }

    /// Import a composite buffer, `extent` must equal [`Extent::from_shape`] of it
    pub fn from_composite(
        volume: &CompositeVolume,
        extent: Extent,
    ) -> Result<ImageImport, RenderError> {
        let data = volume.data();
        if extent != Extent::from_shape(volume.shape()) {
            return Err(RenderError::ExtentMismatch {
                extent: extent.bounds,
                expected: extent.voxel_count(),
                actual: data.len(),
            });
        }

        debug!("Import {:?} as extent {:?}", volume.volume(), extent.bounds);
        ImageImport::new(data.to_vec(), extent)
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn image(&self) -> &ImageData {
        &self.image
    }
}

#[cfg(test)]
mod test {

    use nalgebra::point;

    use super::*;
    use crate::volumetric::{ScalarVolume, VolumeCompositor};

    fn composite(shape: Vector3<usize>) -> CompositeVolume {
        let a = ScalarVolume::from_fn(shape, |x, y, z| (x * 100 + y * 10 + z) as u16).unwrap();
        let b = ScalarVolume::zeros(shape).unwrap();
        VolumeCompositor::default().composite(&a, &b).unwrap()
    }

    mod extent {

        use super::*;

        #[test]
        fn from_shape() {
            let extent = Extent::from_shape(vector![2, 3, 4]);
            assert_eq!(extent.bounds, [0, 3, 0, 2, 0, 1]);
            assert_eq!(extent.dims(), vector![4, 3, 2]);
            assert_eq!(extent.voxel_count(), 24);
        }

        #[test]
        fn inverted_is_empty() {
            let extent = Extent::new([0, 3, 5, 2, 0, 1]);
            assert_eq!(extent.voxel_count(), 0);
        }
    }

    #[test]
    fn mismatch() {
        let res = ImageImport::new(vec![0; 7], Extent::from_shape(vector![2, 2, 2]));
        assert!(matches!(
            res,
            Err(RenderError::ExtentMismatch {
                expected: 8,
                actual: 7,
                ..
            })
        ));
    }

    #[test]
    fn composite_needs_own_extent() {
        let volume = composite(vector![2, 3, 4]);

        assert!(ImageImport::from_composite(&volume, Extent::from_shape(vector![2, 3, 4])).is_ok());
        // right count, wrong axes
        assert!(ImageImport::from_composite(&volume, Extent::from_shape(vector![4, 3, 2])).is_err());
        assert!(ImageImport::from_composite(&volume, Extent::new([0, 3, 0, 2, 0, 2])).is_err());
    }

    #[test]
    fn same_memory_order() {
        let shape = vector![2, 3, 4];
        let volume = composite(shape);
        let import = ImageImport::from_composite(&volume, Extent::from_shape(shape)).unwrap();
        let image = import.image();

        // image (i, j, k) is volume (k, j, i)
        for x in 0..2 {
            for y in 0..3 {
                for z in 0..4 {
                    assert_eq!(image.get(z, y, x), volume.volume().get(x, y, z));
                }
            }
        }
    }

    mod sampling {

        use super::*;

        fn ramp() -> ImageData {
            // value = 10 * x
            let extent = Extent::new([0, 2, 0, 1, 0, 1]);
            let raw = (0..12).map(|i| (i % 3) as u16 * 10).collect();
            ImageImport::new(raw, extent).unwrap().image().clone()
        }

        #[test]
        fn linear() {
            let image = ramp();
            assert_eq!(image.sample_linear(&point![0.5, 0.0, 0.0]), 5.0);
            assert_eq!(image.sample_linear(&point![1.25, 0.7, 0.3]), 12.5);
            // clamped
            assert_eq!(image.sample_linear(&point![7.0, 0.0, 0.0]), 20.0);
            assert_eq!(image.sample_linear(&point![-1.0, 0.0, 0.0]), 0.0);
        }

        #[test]
        fn nearest() {
            let image = ramp();
            assert_eq!(image.sample_nearest(&point![0.6, 0.2, 0.9]), 10.0);
            assert_eq!(image.sample_nearest(&point![2.4, 0.0, 0.0]), 20.0);
        }

        #[test]
        fn gradient() {
            let image = ramp();
            let grad = image.gradient(&point![1.0, 0.5, 0.5], Interpolation::Linear);
            assert_eq!(grad, vector![10.0, 0.0, 0.0]);
        }

        #[test]
        fn single_sample_axis() {
            let image = ImageImport::new(vec![7], Extent::new([0, 0, 0, 0, 0, 0]))
                .unwrap()
                .image()
                .clone();
            assert_eq!(image.sample_linear(&point![0.3, -2.0, 5.0]), 7.0);
            assert_eq!(image.gradient(&point![0.0, 0.0, 0.0], Interpolation::Linear), Vector3::zeros());
        }
    }
}
