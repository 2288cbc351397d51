//! Module with helper functions
//! Saves repetition in unit tests, integration tests and benches

use nalgebra::{point, vector, Vector3};

use crate::{
    render::{Extent, HeadlessWindow, RenderPipeline, RenderSettings},
    volumetric::{
        generate::{generate, Hotspot, HotspotGenerator, PhantomGenerator},
        vol_reader::VolumeHeader,
        CompositeVolume, ScalarVolume,
    },
};

pub fn solid_volume(shape: Vector3<usize>, value: u16) -> ScalarVolume {
    ScalarVolume::filled(shape, value).unwrap()
}

/// Saturating sum of `a` and `b`
pub fn composite_of(a: &ScalarVolume, b: &ScalarVolume) -> CompositeVolume {
    RenderSettings::default().compositor().composite(a, b).unwrap()
}

pub fn phantom_volume(shape: Vector3<usize>) -> ScalarVolume {
    generate(&PhantomGenerator::default(), shape).unwrap()
}

/// One bright spot of expression in the middle, zero elsewhere
pub fn hotspot_volume(shape: Vector3<usize>) -> ScalarVolume {
    let generator = HotspotGenerator {
        base: 0,
        spots: vec![Hotspot {
            center: point![0.0, 0.0, 0.0],
            radius: 0.25,
            peak: 4000,
        }],
    };
    generate(&generator, shape).unwrap()
}

/// Pipeline with `volume` imported and mapper and property attached per `settings`
pub fn headless_pipeline(
    settings: &RenderSettings,
    volume: &CompositeVolume,
) -> RenderPipeline<HeadlessWindow> {
    let mut pipeline = RenderPipeline::new(HeadlessWindow::new(), settings);
    pipeline
        .import_volume(volume, Extent::from_shape(volume.shape()))
        .unwrap();
    pipeline.attach_mapper(settings.mapper());
    pipeline.attach_property(settings.classifier().volume_property());
    pipeline
}

/// `volume` encoded as a `.vol` file
pub fn vol_file_bytes(volume: &ScalarVolume) -> Vec<u8> {
    let mut bytes = VolumeHeader::linear(volume.shape(), vector![1.0, 1.0, 1.0]).to_bytes();
    for sample in volume.data() {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}
