use std::str::FromStr;

use log::debug;
use nalgebra::Vector3;

use crate::error::{shape_of, VolumeError};

use super::ScalarVolume;

/// What happens when the sum of two samples does not fit into `u16`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Clamp to `u16::MAX`
    #[default]
    Saturate,
    /// Sum modulo 65536, bit-exact with plain `u16` array addition
    Wrap,
}

impl OverflowPolicy {
    fn add(self, a: u16, b: u16) -> (u16, bool) {
        match self {
            OverflowPolicy::Saturate => {
                let (sum, overflow) = a.overflowing_add(b);
                if overflow {
                    (u16::MAX, true)
                } else {
                    (sum, false)
                }
            }
            OverflowPolicy::Wrap => a.overflowing_add(b),
        }
    }
}

impl FromStr for OverflowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "saturate" | "clamp" => Ok(OverflowPolicy::Saturate),
            "wrap" => Ok(OverflowPolicy::Wrap),
            _ => Err(format!("unknown overflow policy '{s}'")),
        }
    }
}

/// Sum of two volumes.
/// Immutable once built, can be imported into any number of pipelines.
#[derive(Debug, Clone)]
pub struct CompositeVolume {
    volume: ScalarVolume,
    policy: OverflowPolicy,
    overflowed: usize,
}

impl CompositeVolume {
    pub fn volume(&self) -> &ScalarVolume {
        &self.volume
    }

    pub fn shape(&self) -> Vector3<usize> {
        self.volume.shape()
    }

    pub fn data(&self) -> &[u16] {
        self.volume.data()
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Number of voxels whose sum did not fit into `u16`
    pub fn overflowed(&self) -> usize {
        self.overflowed
    }
}

/// Combines an anatomical volume with an overlay of the same shape
#[derive(Debug, Clone, Copy, Default)]
pub struct VolumeCompositor {
    policy: OverflowPolicy,
}

impl VolumeCompositor {
    pub fn new(policy: OverflowPolicy) -> VolumeCompositor {
        VolumeCompositor { policy }
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Voxelwise sum `C[i] = A[i] + B[i]`
    ///
    /// Fails with [`VolumeError::DimensionMismatch`] if the shapes differ.
    pub fn composite(
        &self,
        a: &ScalarVolume,
        b: &ScalarVolume,
    ) -> Result<CompositeVolume, VolumeError> {
        if a.shape() != b.shape() {
            return Err(VolumeError::DimensionMismatch {
                left: shape_of(&a.shape()),
                right: shape_of(&b.shape()),
            });
        }

        let mut overflowed = 0;
        let data: Vec<u16> = a
            .data()
            .iter()
            .zip(b.data())
            .map(|(&va, &vb)| {
                let (sum, overflow) = self.policy.add(va, vb);
                overflowed += overflow as usize;
                sum
            })
            .collect();

        if overflowed > 0 {
            debug!(
                "Composite: {overflowed} of {} voxels overflowed ({:?})",
                data.len(),
                self.policy
            );
        }

        let volume = ScalarVolume::new(a.shape(), data)?;

        Ok(CompositeVolume {
            volume,
            policy: self.policy,
            overflowed,
        })
    }
}
