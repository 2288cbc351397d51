use std::error::Error;

use genevis_lib::volumetric::{
    generate::{PhantomGenerator, SampleGenerator},
    vol_reader::VolumeHeader,
    ScalarVolume,
};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use nalgebra::Vector3;
use rayon::prelude::*;

use crate::{
    config::{Config, GeneratorConfig},
    file::write_volume,
};

mod hotspots;
mod solid;

pub use hotspots::random_hotspots;
pub use solid::PaddedSolidGenerator;

pub type BoxedGenerator = Box<dyn SampleGenerator + Sync>;

pub fn get_sample_generator(config: &Config) -> BoxedGenerator {
    match config.generator {
        GeneratorConfig::Solid { sample, pad } => Box::new(PaddedSolidGenerator { sample, pad }),
        GeneratorConfig::Phantom => Box::new(PhantomGenerator::default()),
        GeneratorConfig::Hotspots {
            n_of_spots,
            peak,
            base,
        } => Box::new(random_hotspots(n_of_spots, peak, base, config.seed)),
    }
}

/// Samples in file order, x-slices are generated in parallel
pub fn generate_samples<G>(gen: &G, dims: Vector3<usize>, progress: &ProgressBar) -> Vec<u16>
where
    G: SampleGenerator + Sync + ?Sized,
{
    let slice_len = dims.y * dims.z;
    let mut samples = vec![0; dims.x * slice_len];

    samples
        .par_chunks_mut(slice_len)
        .enumerate()
        .for_each(|(x, slice)| {
            for y in 0..dims.y {
                for z in 0..dims.z {
                    slice[y * dims.z + z] = gen.sample_at(Vector3::new(x, y, z), dims);
                }
            }
            progress.inc(1);
        });

    samples
}

pub fn generate_vol(config: &Config) -> Result<(), Box<dyn Error>> {
    ScalarVolume::checked_count(config.dims)?;
    let gen = get_sample_generator(config);

    let progress = ProgressBar::new(config.dims.x as u64);
    progress.set_style(
        ProgressStyle::default_bar().template("{msg} [{bar:40}] {pos}/{len} slices ({eta})"),
    );
    progress.set_message("Generating");

    let samples = generate_samples(gen.as_ref(), config.dims, &progress);
    progress.finish_and_clear();

    let header = VolumeHeader::linear(config.dims, config.cell_shape).to_bytes();
    write_volume(&config.file_name, &header, &samples)?;

    info!("Generating finished, result in {:?}", config.file_name);
    Ok(())
}

#[cfg(test)]
mod test {

    use std::ffi::OsString;

    use genevis_lib::volumetric::{generate::generate, vol_reader};
    use nalgebra::vector;

    use super::*;

    #[test]
    fn parallel_matches_sequential() {
        let dims = vector![7, 5, 6];
        let gen = PhantomGenerator::default();
        let samples = generate_samples(&gen, dims, &ProgressBar::hidden());
        let expected = generate(&gen, dims).unwrap();
        assert_eq!(samples, expected.data());
    }

    #[test]
    fn written_file_reads_back() {
        let path = std::env::temp_dir().join(format!("vol_gen_test_{}.vol", std::process::id()));
        let config = Config {
            dims: vector![4, 3, 5],
            cell_shape: vector![1.0, 1.0, 1.0],
            generator: GeneratorConfig::Solid {
                sample: 1000,
                pad: 1,
            },
            file_name: OsString::from(&path),
            seed: None,
        };

        generate_vol(&config).unwrap();
        let volume = vol_reader::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(volume.shape(), vector![4, 3, 5]);
        assert_eq!(volume.get(0, 0, 0), Some(0));
        assert_eq!(volume.get(1, 1, 1), Some(1000));
        assert_eq!(volume.get(2, 1, 3), Some(1000));
        assert_eq!(volume.get(3, 1, 2), Some(0));
    }

    #[test]
    fn oversized_dims_rejected() {
        let path = std::env::temp_dir().join(format!("vol_gen_big_{}.vol", std::process::id()));
        let max = u32::MAX as usize;
        let config = Config {
            dims: vector![max, max, max],
            cell_shape: vector![1.0, 1.0, 1.0],
            generator: GeneratorConfig::Phantom,
            file_name: OsString::from(&path),
            seed: None,
        };

        assert!(generate_vol(&config).is_err());
        assert!(!path.exists());
    }
}
