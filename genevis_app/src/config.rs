use std::{path::PathBuf, str::FromStr};

use clap::ArgMatches;
use genevis_lib::{render::BlendMode, OverflowPolicy, RenderSettings};
use nalgebra::{vector, Vector3};

use crate::app::defaults;

/// Parse a value that passed `clap` validation
fn parse_value<T>(args: &ArgMatches, key: &str) -> Result<Option<T>, String>
where
    T: FromStr,
{
    args.value_of(key)
        .map(|v| v.parse::<T>().map_err(|_| format!("invalid value '{v}' for {key}")))
        .transpose()
}

fn parse_values<T>(args: &ArgMatches, key: &str) -> Result<Option<Vec<T>>, String>
where
    T: FromStr,
{
    match args.values_of(key) {
        Some(values) => values
            .map(|v| v.parse::<T>().map_err(|_| format!("invalid value '{v}' for {key}")))
            .collect::<Result<Vec<T>, String>>()
            .map(Some),
        None => Ok(None),
    }
}

/// Where the expression volume comes from
#[derive(Debug, Clone, PartialEq)]
pub enum OverlaySource {
    File(PathBuf),
    /// Every voxel has this value
    Constant(u16),
}

/// App configuration
/// Config is built from args parsed by `clap`
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Anatomical volume, `None` generates a phantom
    pub mri: Option<PathBuf>,
    pub overlay: OverlaySource,
    /// Shape of the phantom
    pub phantom_dims: Vector3<usize>,
    pub settings: RenderSettings,
}

impl Config {
    pub fn from_args(args: &ArgMatches) -> Result<Config, String> {
        let mri = args.value_of_os("mri").map(PathBuf::from);

        let overlay = match args.value_of_os("overlay") {
            Some(path) => OverlaySource::File(PathBuf::from(path)),
            None => OverlaySource::Constant(
                parse_value(args, "overlay-value")?.unwrap_or(defaults::OVERLAY_VALUE),
            ),
        };

        let phantom_dims = match parse_values::<usize>(args, "phantom-dims")? {
            Some(d) => vector![d[0], d[1], d[2]],
            None => defaults::PHANTOM_DIMS,
        };

        let mut settings = RenderSettings::default();
        if let Some(threshold) = parse_value(args, "threshold")? {
            settings.threshold = threshold;
        }
        if let Some(distance) = parse_value(args, "sample-distance")? {
            settings.sample_distance = distance;
        }
        if let Some(factor) = parse_value(args, "interactive-factor")? {
            settings.interactive_factor = factor;
        }
        if let Some(size) = parse_values::<usize>(args, "size")? {
            settings.window_size = (size[0], size[1]);
        }
        if let Some(blend) = parse_value::<BlendMode>(args, "blend")? {
            settings.blend_mode = blend;
        }
        if let Some(overflow) = parse_value::<OverflowPolicy>(args, "overflow")? {
            settings.overflow = overflow;
        }
        settings.adaptive_sampling = args.is_present("adaptive");

        Ok(Config {
            mri,
            overlay,
            phantom_dims,
            settings,
        })
    }
}
