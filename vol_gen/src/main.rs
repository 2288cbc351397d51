//! Volume generator
//!
//! Writes `.vol` files readable by `genevis_lib`, for example a phantom
//! and a matching expression overlay:
//! `vol_gen --dims=96,96,96 -g phantom -o head.vol`
//! `vol_gen --dims=96,96,96 -g hotspots --seed 42 -o expr.vol`

use std::process;

use config::Config;
use log::{error, info};

mod args;
mod config;
mod file;
mod generators;

use crate::{args::get_command, generators::generate_vol};

pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = get_command().get_matches();

    let cfg = match Config::from_args(&args) {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    info!("Generating volume {:?}", cfg);

    if let Err(e) = generate_vol(&cfg) {
        error!("{e}");
        process::exit(1);
    }
}
