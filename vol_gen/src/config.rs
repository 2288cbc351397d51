use std::{ffi::OsString, str::FromStr};

use clap::ArgMatches;
use nalgebra::{vector, Vector3};

/// Values of `key` parsed into a vector
fn values_to_vector3<T>(args: &ArgMatches, key: &str) -> Result<Vector3<T>, String>
where
    T: FromStr + Copy + std::fmt::Debug + PartialEq + 'static,
{
    let vals: Vec<T> = args
        .values_of(key)
        .ok_or_else(|| format!("missing {key}"))?
        .map(|v| v.parse::<T>().map_err(|_| format!("invalid value '{v}' for {key}")))
        .collect::<Result<_, _>>()?;
    match vals[..] {
        [x, y, z] => Ok(vector![x, y, z]),
        _ => Err(format!("{key} needs 3 values")),
    }
}

fn value_of<T>(args: &ArgMatches, key: &str) -> Result<T, String>
where
    T: FromStr,
{
    let v = args.value_of(key).ok_or_else(|| format!("missing {key}"))?;
    v.parse::<T>()
        .map_err(|_| format!("invalid value '{v}' for {key}"))
}

/// App configuration
/// Config is built from args parsed by `clap`
#[derive(Debug)]
pub struct Config {
    /// Dimensions of volume
    pub dims: Vector3<usize>,
    /// Shape of cells
    pub cell_shape: Vector3<f32>,
    /// Type of generator to be used
    pub generator: GeneratorConfig,
    // Output file name
    pub file_name: OsString,
    /// Optional seed for RNG, to replicate results
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_args(args: &ArgMatches) -> Result<Config, String> {
        let dims = values_to_vector3(args, "dims")?;
        let cell_shape = values_to_vector3(args, "shape")?;
        let generator = GeneratorConfig::from_args(args)?;
        let file_name = args
            .value_of_os("output-file")
            .ok_or("missing output-file")?
            .into();
        let seed = args
            .value_of("seed")
            .map(|_| value_of(args, "seed"))
            .transpose()?;

        Ok(Config {
            dims,
            cell_shape,
            generator,
            file_name,
            seed,
        })
    }
}

/// Settings specific to generator variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeneratorConfig {
    /// Same value everywhere except a zero border
    Solid { sample: u16, pad: usize },
    /// Head-like anatomical phantom
    Phantom,
    /// Randomly placed expression spots
    Hotspots {
        n_of_spots: usize,
        peak: u16,
        base: u16,
    },
}

impl GeneratorConfig {
    pub fn from_args(args: &ArgMatches) -> Result<GeneratorConfig, String> {
        let name = args.value_of("generator").ok_or("missing generator")?;

        match name {
            "solid" => Ok(GeneratorConfig::Solid {
                sample: value_of(args, "sample")?,
                pad: value_of(args, "pad")?,
            }),
            "phantom" => Ok(GeneratorConfig::Phantom),
            "hotspots" => Ok(GeneratorConfig::Hotspots {
                n_of_spots: value_of(args, "n-of-spots")?,
                peak: value_of(args, "peak")?,
                base: value_of(args, "base")?,
            }),
            _ => Err(format!("unknown generator '{name}'")),
        }
    }
}
