use nalgebra::Vector3;

use crate::error::{shape_of, VolumeError};

/// Dense grid of `u16` samples.
///
/// Shape is `(w, d, h)`, the last axis varies fastest in memory:
/// `index = z + y * h + x * d * h`.
#[derive(Clone, PartialEq, Eq)]
pub struct ScalarVolume {
    shape: Vector3<usize>,
    data: Vec<u16>,
}

impl std::fmt::Debug for ScalarVolume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalarVolume")
            .field("shape", &shape_of(&self.shape))
            .field("data len", &self.data.len())
            .finish()
    }
}

impl ScalarVolume {
    /// Wrap `data` as a volume of `shape`
    pub fn new(shape: Vector3<usize>, data: Vec<u16>) -> Result<ScalarVolume, VolumeError> {
        let expected = Self::checked_count(shape)?;
        if data.len() != expected {
            return Err(VolumeError::DataLength {
                shape: shape_of(&shape),
                expected,
                actual: data.len(),
            });
        }
        Ok(ScalarVolume { shape, data })
    }

    /// Volume with every sample set to `value`
    pub fn filled(shape: Vector3<usize>, value: u16) -> Result<ScalarVolume, VolumeError> {
        let count = Self::checked_count(shape)?;
        Ok(ScalarVolume {
            shape,
            data: vec![value; count],
        })
    }

    pub fn zeros(shape: Vector3<usize>) -> Result<ScalarVolume, VolumeError> {
        Self::filled(shape, 0)
    }

    /// Build volume sample by sample, `f` gets `(x, y, z)` in memory order
    pub fn from_fn<F>(shape: Vector3<usize>, mut f: F) -> Result<ScalarVolume, VolumeError>
    where
        F: FnMut(usize, usize, usize) -> u16,
    {
        let count = Self::checked_count(shape)?;
        let mut data = Vec::with_capacity(count);
        for x in 0..shape.x {
            for y in 0..shape.y {
                for z in 0..shape.z {
                    data.push(f(x, y, z));
                }
            }
        }
        Ok(ScalarVolume { shape, data })
    }

    /// Voxel count of `shape`, the sample buffer must stay addressable
    pub fn checked_count(shape: Vector3<usize>) -> Result<usize, VolumeError> {
        if shape.iter().any(|&d| d == 0) {
            return Err(VolumeError::EmptyDimension(shape_of(&shape)));
        }
        shape
            .x
            .checked_mul(shape.y)
            .and_then(|n| n.checked_mul(shape.z))
            .filter(|&n| n <= isize::MAX as usize / std::mem::size_of::<u16>())
            .ok_or(VolumeError::TooLarge(shape_of(&shape)))
    }

    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        z + y * self.shape.z + x * self.shape.y * self.shape.z
    }

    pub fn shape(&self) -> Vector3<usize> {
        self.shape
    }

    pub fn voxel_count(&self) -> usize {
        self.data.len()
    }

    /// Sample at grid position, `None` if outside
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<u16> {
        if x >= self.shape.x || y >= self.shape.y || z >= self.shape.z {
            return None;
        }
        self.data.get(self.index(x, y, z)).copied()
    }

    pub fn data(&self) -> &[u16] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u16> {
        self.data
    }

    /// Smallest and largest sample
    pub fn value_range(&self) -> (u16, u16) {
        self.data
            .iter()
            .fold((u16::MAX, u16::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }
}

#[cfg(test)]
mod test {

    use nalgebra::vector;

    use super::*;

    #[test]
    fn memory_order() {
        let vol = ScalarVolume::new(vector![2, 2, 3], (0..12).collect()).unwrap();

        assert_eq!(vol.get(0, 0, 0), Some(0));
        assert_eq!(vol.get(0, 0, 2), Some(2));
        assert_eq!(vol.get(0, 1, 0), Some(3));
        assert_eq!(vol.get(1, 0, 0), Some(6));
        assert_eq!(vol.get(1, 1, 2), Some(11));
        assert_eq!(vol.get(2, 0, 0), None);
        assert_eq!(vol.get(0, 0, 3), None);
    }

    #[test]
    fn from_fn_matches_index() {
        let vol = ScalarVolume::from_fn(vector![3, 4, 5], |x, y, z| (x * 100 + y * 10 + z) as u16)
            .unwrap();
        assert_eq!(vol.get(2, 3, 4), Some(234));
        assert_eq!(vol.get(1, 0, 3), Some(103));
        assert_eq!(vol.voxel_count(), 60);
    }

    #[test]
    fn wrong_length() {
        let res = ScalarVolume::new(vector![2, 2, 2], vec![0; 7]);
        assert!(matches!(
            res,
            Err(VolumeError::DataLength {
                expected: 8,
                actual: 7,
                ..
            })
        ));
    }

    #[test]
    fn zero_axis() {
        let res = ScalarVolume::zeros(vector![4, 0, 4]);
        assert!(matches!(res, Err(VolumeError::EmptyDimension([4, 0, 4]))));
    }

    #[test]
    fn too_large() {
        let shape = vector![usize::MAX / 2, 4, 4];
        assert!(matches!(ScalarVolume::zeros(shape), Err(VolumeError::TooLarge(_))));
        assert!(matches!(
            ScalarVolume::from_fn(shape, |_, _, _| 1),
            Err(VolumeError::TooLarge(_))
        ));

        // fits usize, but not in memory as u16 samples
        let res = ScalarVolume::new(vector![1 << 21, 1 << 21, 1 << 21], vec![]);
        assert!(matches!(res, Err(VolumeError::TooLarge(_))));
    }

    #[test]
    fn value_range() {
        let vol = ScalarVolume::new(vector![1, 2, 2], vec![7, 3, 900, 12]).unwrap();
        assert_eq!(vol.value_range(), (3, 900));
    }
}
