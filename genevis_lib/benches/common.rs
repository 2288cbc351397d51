pub use criterion::{black_box, Criterion};

pub use genevis_lib::{
    render::{HeadlessWindow, RenderPipeline, RenderSettings},
    test_helpers::{headless_pipeline, hotspot_volume, phantom_volume},
    CompositeVolume, VolumeCompositor,
};
pub use nalgebra::{vector, Vector3};

pub const SHAPE: Vector3<usize> = vector![64, 64, 64];
pub const RESOLUTION: (usize, usize) = (256, 256);

/// Orbit steps, in degrees, taken between frames
pub const CAMERA_STEPS: [(f32, f32); 4] = [(0.0, 0.0), (35.0, 0.0), (0.0, 20.0), (-60.0, -25.0)];

pub fn composite() -> CompositeVolume {
    VolumeCompositor::default()
        .composite(&phantom_volume(SHAPE), &hotspot_volume(SHAPE))
        .unwrap()
}

pub fn settings() -> RenderSettings {
    RenderSettings {
        window_size: RESOLUTION,
        sample_distance: 0.5,
        ..Default::default()
    }
}

/// Render one frame per camera step
pub fn orbit_frames(pipeline: &mut RenderPipeline<HeadlessWindow>) {
    for (azimuth, elevation) in CAMERA_STEPS {
        pipeline.camera_mut().orbit(azimuth, elevation);
        black_box(pipeline.render().unwrap());
    }
}
