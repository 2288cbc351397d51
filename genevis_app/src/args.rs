//! Argument parsing and validation
//! Uses library `clap`

use clap::{Arg, Command, ValueHint};

pub fn is_positive_number(num: &str) -> Result<(), String> {
    match num.parse::<u32>() {
        Ok(n) if n > 0 => Ok(()),
        Ok(_) => Err("Number must be greater than 0".into()),
        Err(_) => Err("Number required".into()),
    }
}

pub fn can_fit_u16(num: &str) -> Result<(), String> {
    match num.parse::<u16>() {
        Ok(_) => Ok(()),
        Err(_) => Err("Number does not fit in range <0;65535>".into()),
    }
}

pub fn is_float_number(num: &str) -> Result<(), String> {
    match num.parse::<f32>() {
        Ok(n) if n > 0.0 && n.is_finite() => Ok(()),
        Ok(_) => Err("Number must be greater than 0.0".into()),
        Err(_) => Err("Number required".into()),
    }
}

const BLEND_NAMES: &[&str] = &["mip", "composite"];
const OVERFLOW_NAMES: &[&str] = &["saturate", "wrap"];

pub fn get_command<'a>() -> Command<'a> {
    Command::new("genevis")
        .version("0.1.0")
        .about("Renders an MRI volume with a gene expression overlay")
        .arg(
            Arg::new("mri")
                .help("Anatomical volume (.vol), a head phantom is generated if left out")
                .long("mri")
                .short('m')
                .value_name("FILE")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("overlay")
                .help("Expression volume (.vol), same shape as the anatomical one")
                .long("overlay")
                .short('o')
                .value_name("FILE")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath)
                .conflicts_with("overlay-value"),
        )
        .arg(
            Arg::new("overlay-value")
                .help("Fill the overlay with one value instead of reading a file")
                .long("overlay-value")
                .value_name("VALUE")
                .validator(can_fit_u16),
        )
        .arg(
            Arg::new("phantom-dims")
                .help("Dimensions of the generated phantom")
                .long("phantom-dims")
                .number_of_values(3)
                .value_names(&["X", "Y", "Z"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .conflicts_with("mri")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("threshold")
                .help("Intensity where the expression regime starts")
                .long("threshold")
                .short('t')
                .value_name("VALUE")
                .validator(is_float_number),
        )
        .arg(
            Arg::new("sample-distance")
                .help("Distance between samples along a ray, in voxels")
                .long("sample-distance")
                .value_name("DIST")
                .validator(is_float_number),
        )
        .arg(
            Arg::new("interactive-factor")
                .help("Sample distance multiplier while interacting")
                .long("interactive-factor")
                .value_name("FACTOR")
                .validator(is_float_number),
        )
        .arg(
            Arg::new("size")
                .help("Window size")
                .long("size")
                .short('s')
                .number_of_values(2)
                .value_names(&["W", "H"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("blend")
                .help("Blend mode of the mapper")
                .long("blend")
                .short('b')
                .value_name("MODE")
                .possible_values(BLEND_NAMES),
        )
        .arg(
            Arg::new("overflow")
                .help("What happens when the sum of two samples overflows")
                .long("overflow")
                .value_name("POLICY")
                .possible_values(OVERFLOW_NAMES),
        )
        .arg(
            Arg::new("adaptive")
                .help("Scale sample distance by the last frame time")
                .long("adaptive"),
        )
}
