//! Synthetic volumes
//!
//! Stand-ins for real scans and expression maps, used by the demo app,
//! the `vol_gen` tool and tests.

use nalgebra::{point, Point3, Vector3};

use crate::error::VolumeError;

use super::ScalarVolume;

/// Generates one sample at a time, at any location
pub trait SampleGenerator {
    fn sample_at(&self, coords: Vector3<usize>, shape: Vector3<usize>) -> u16;
}

/// Run generator over every voxel of `shape`
pub fn generate<G>(generator: &G, shape: Vector3<usize>) -> Result<ScalarVolume, VolumeError>
where
    G: SampleGenerator + ?Sized,
{
    ScalarVolume::from_fn(shape, |x, y, z| {
        generator.sample_at(Vector3::new(x, y, z), shape)
    })
}

/// Voxel coordinates mapped to `<-1;1>` on every axis
pub fn normalized(coords: Vector3<usize>, shape: Vector3<usize>) -> Point3<f32> {
    let n = coords.zip_map(&shape, |c, s| {
        if s <= 1 {
            0.0
        } else {
            2.0 * c as f32 / (s - 1) as f32 - 1.0
        }
    });
    Point3::from(n)
}

/// Every sample has the same value
pub struct SolidGenerator {
    pub sample: u16,
}

impl SampleGenerator for SolidGenerator {
    fn sample_at(&self, _coords: Vector3<usize>, _shape: Vector3<usize>) -> u16 {
        self.sample
    }
}

/// Head-like phantom: scalp, CSF layer, brain tissue and two ventricles.
/// All values stay below 256 when `tissue` is left at default.
pub struct PhantomGenerator {
    pub scalp: u16,
    pub csf: u16,
    pub tissue: u16,
    pub ventricle: u16,
}

impl Default for PhantomGenerator {
    fn default() -> Self {
        Self {
            scalp: 200,
            csf: 40,
            tissue: 90,
            ventricle: 25,
        }
    }
}

impl SampleGenerator for PhantomGenerator {
    fn sample_at(&self, coords: Vector3<usize>, shape: Vector3<usize>) -> u16 {
        let p = normalized(coords, shape);
        let r = (p - Point3::origin()).magnitude();

        if r > 0.92 {
            return 0;
        }
        if r > 0.85 {
            return self.scalp;
        }
        if r > 0.8 {
            return self.csf;
        }

        let in_ventricle = [point![-0.18, 0.1, 0.0], point![0.18, 0.1, 0.0]]
            .iter()
            .any(|c| (p - c).component_mul(&Vector3::new(1.0, 0.6, 1.4)).magnitude() < 0.14);
        if in_ventricle {
            return self.ventricle;
        }

        // folds
        let ripple = (6.0 * p.x).cos() * (5.0 * p.y).cos() * (4.0 * p.z).sin();
        let value = self.tissue as f32 * (1.0 + 0.2 * ripple);
        value.round().clamp(0.0, u16::MAX as f32) as u16
    }
}

/// Gaussian spot of expression, center in normalized coordinates
#[derive(Debug, Clone, Copy)]
pub struct Hotspot {
    pub center: Point3<f32>,
    pub radius: f32,
    pub peak: u16,
}

/// Sum of a constant base and gaussian spots
pub struct HotspotGenerator {
    pub base: u16,
    pub spots: Vec<Hotspot>,
}

impl SampleGenerator for HotspotGenerator {
    fn sample_at(&self, coords: Vector3<usize>, shape: Vector3<usize>) -> u16 {
        let p = normalized(coords, shape);
        let spots: f32 = self
            .spots
            .iter()
            .map(|spot| {
                let d2 = (p - spot.center).norm_squared();
                spot.peak as f32 * (-d2 / (2.0 * spot.radius * spot.radius)).exp()
            })
            .sum();
        (self.base as f32 + spots).round().min(u16::MAX as f32) as u16
    }
}
