use genevis_lib::volumetric::generate::SampleGenerator;
use nalgebra::Vector3;

/// Generate solid volume
/// All samples are the same, except a zero border of `pad` voxels
pub struct PaddedSolidGenerator {
    /// The sample value
    pub sample: u16,
    pub pad: usize,
}

impl SampleGenerator for PaddedSolidGenerator {
    fn sample_at(&self, coords: Vector3<usize>, shape: Vector3<usize>) -> u16 {
        let in_border = coords
            .iter()
            .zip(shape.iter())
            .any(|(&c, &s)| c < self.pad || c + self.pad >= s);
        if in_border {
            0
        } else {
            self.sample
        }
    }
}
