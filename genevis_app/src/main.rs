//! Gene expression viewer
//!
//! Renders an anatomical volume with an expression overlay added on top.
//! Launch without arguments to view a generated head phantom:
//! `cargo run --release --bin genevis_app`
//!
//! Drag with the left mouse button to orbit, scroll to zoom.
//! Arrow keys and PageUp/PageDown move the clip box faces, `R` resets it.

use std::{error::Error, process, thread, time::Duration};

use genevis_lib::{
    render::{Extent, RenderPipeline},
    volumetric::{
        generate::{generate, PhantomGenerator, SolidGenerator},
        vol_reader,
    },
    ScalarVolume,
};
use log::{error, info, warn};

mod app;
mod args;
mod config;

use app::{defaults, AppState, MinifbWindow};
use config::{Config, OverlaySource};

fn load_volumes(cfg: &Config) -> Result<(ScalarVolume, ScalarVolume), Box<dyn Error>> {
    let mri = match &cfg.mri {
        Some(path) => vol_reader::from_file(path)?,
        None => {
            info!("Generating phantom {:?}", cfg.phantom_dims.as_slice());
            generate(&PhantomGenerator::default(), cfg.phantom_dims)?
        }
    };

    let overlay = match &cfg.overlay {
        OverlaySource::File(path) => vol_reader::from_file(path)?,
        &OverlaySource::Constant(sample) => generate(&SolidGenerator { sample }, mri.shape())?,
    };

    Ok((mri, overlay))
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = args::get_command().get_matches();
    let cfg = Config::from_args(&args)?;
    let settings = &cfg.settings;

    let (mri, overlay) = load_volumes(&cfg)?;

    let composite = settings.compositor().composite(&mri, &overlay)?;
    if composite.overflowed() > 0 {
        warn!(
            "{} voxels overflowed while compositing ({:?})",
            composite.overflowed(),
            composite.policy()
        );
    }
    // inputs are not needed once summed
    drop((mri, overlay));

    let mut pipeline = RenderPipeline::new(MinifbWindow::new(), settings);
    pipeline.import_volume(&composite, Extent::from_shape(composite.shape()))?;
    pipeline.attach_mapper(settings.mapper());
    pipeline.attach_property(settings.classifier().volume_property());

    let mut state = AppState::new(pipeline, settings.controller())?;

    while state.is_running() {
        match state.render_if_requested()? {
            Some(report) => info!(
                "Frame {:?} in {:?}, sample distance {}",
                report.quality, report.elapsed, report.sample_distance
            ),
            None => {
                state.pipeline_mut().window_mut().idle();
                thread::sleep(Duration::from_millis(defaults::POLL_INTERVAL_MS));
            }
        }

        let input = state.pipeline().window().input();
        state.apply(&input)?;
    }

    info!("App shutting down");
    Ok(())
}

pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{e}");
        process::exit(1);
    }
}
