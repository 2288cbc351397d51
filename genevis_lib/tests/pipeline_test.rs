use nalgebra::{point, vector};

use genevis_lib::{
    common::BoundBox,
    render::{
        BoxWidget, Face, Plane, PlaneSet, RenderQuality, RenderSettings, RenderWindow,
    },
    test_helpers::{
        composite_of, headless_pipeline, hotspot_volume, phantom_volume, solid_volume,
        vol_file_bytes,
    },
    transfer::{ProfileKind, VolumeProperty},
    volumetric::{vol_reader, DataSource},
    InteractionController, InteractionEvent, VolumeError, VolumeCompositor,
};

fn quick_settings() -> RenderSettings {
    RenderSettings {
        sample_distance: 0.5,
        window_size: (64, 64),
        ..Default::default()
    }
}

#[test]
fn small_sum_renders_as_anatomy() {
    let a = solid_volume(vector![2, 2, 2], 10);
    let b = solid_volume(vector![2, 2, 2], 5);
    let composite = composite_of(&a, &b);

    assert_eq!(composite.data(), &[15; 8]);

    let classifier = RenderSettings::default().classifier();
    assert!(composite
        .data()
        .iter()
        .all(|&v| classifier.select(v as f32) == ProfileKind::Anatomical));

    let mut pipeline = headless_pipeline(&quick_settings(), &composite);
    pipeline.render().unwrap();

    let frame = pipeline.frame().unwrap();
    assert!(frame.max_alpha() > 0.0);
    // no expression color anywhere
    assert!(frame.pixels().iter().all(|p| p.z == 0.0));
}

#[test]
fn zero_volume_is_transparent() {
    let zeros = solid_volume(vector![6, 6, 6], 0);
    let composite = composite_of(&zeros, &zeros);

    let mut pipeline = headless_pipeline(&quick_settings(), &composite);
    pipeline.render().unwrap();

    assert_eq!(pipeline.frame().unwrap().max_alpha(), 0.0);
    let shown = pipeline.window().last_frame().unwrap();
    assert!(shown.iter().all(|&px| px == 0));
}

#[test]
fn zero_volume_transparent_under_anatomy() {
    let classifier = RenderSettings::default().classifier();
    let anatomy = classifier.anatomical();
    assert_eq!(anatomy.name(), "anatomical");

    // the profile alone would make intensity 0 opaque
    let light = vector![0.0, 0.0, 1.0];
    assert!(anatomy.classify(0.0, &vector![0.0, 0.0, 0.0], &light).w > 0.0);

    let mut property = VolumeProperty::new();
    property.set_profile(anatomy);
    assert_eq!(property.classify(0.0, &vector![0.0, 0.0, 0.0], &light).w, 0.0);

    let zeros = solid_volume(vector![6, 6, 6], 0);
    let composite = composite_of(&zeros, &zeros);
    let mut pipeline = headless_pipeline(&quick_settings(), &composite);
    pipeline.attach_property(property);
    pipeline.render().unwrap();

    assert_eq!(pipeline.frame().unwrap().max_alpha(), 0.0);
    let shown = pipeline.window().last_frame().unwrap();
    assert!(shown.iter().all(|&px| px == 0));
}

#[test]
fn window_opens_once_with_defaults() {
    let settings = RenderSettings {
        sample_distance: 1.0,
        ..Default::default()
    };
    let volume = solid_volume(vector![4, 4, 4], 100);
    let composite = composite_of(&volume, &solid_volume(vector![4, 4, 4], 0));
    let mut pipeline = headless_pipeline(&settings, &composite);

    pipeline.render().unwrap();
    pipeline.render().unwrap();

    let window = pipeline.window();
    assert_eq!(window.open_calls(), 1);
    assert_eq!(window.presented(), 2);
    assert!(window.is_open());

    let state = window.state().unwrap();
    assert_eq!(state.size, (700, 700));
    assert_eq!(state.background, vector![0.0, 0.0, 0.0]);
    assert_eq!(window.last_frame().unwrap().len(), 700 * 700);
}

#[test]
fn expression_shows_through() {
    let shape = vector![16, 16, 16];
    let composite = VolumeCompositor::default()
        .composite(&phantom_volume(shape), &hotspot_volume(shape))
        .unwrap();

    let mut pipeline = headless_pipeline(&quick_settings(), &composite);
    pipeline.render().unwrap();

    // MIP picks the hotspot in the middle of the image
    let center = pipeline.frame().unwrap().get(32, 32).copied().unwrap();
    assert!(center.w > 0.0);
    assert!(center.x > center.y);
}

#[test]
fn clipped_away_is_transparent() {
    let shape = vector![8, 8, 8];
    let composite = composite_of(&solid_volume(shape, 100), &solid_volume(shape, 0));
    let mut pipeline = headless_pipeline(&quick_settings(), &composite);
    let mut controller = InteractionController::new();

    // keep only x >= 8, the volume ends at 7
    let mut planes = PlaneSet::new();
    planes.push(Plane::new(point![8.0, 0.0, 0.0], vector![1.0, 0.0, 0.0]));
    {
        let mut ctx = pipeline.interaction_context().unwrap();
        assert!(controller.handle(&InteractionEvent::ClipVolumeRender(&planes), &mut ctx));
    }
    pipeline.render().unwrap();
    assert_eq!(pipeline.frame().unwrap().max_alpha(), 0.0);

    // widget on the whole volume clips nothing
    let mut widget = BoxWidget::new(BoundBox::from_grid_dims(shape));
    widget.push_face(0, Face::Lower, 3.0);
    widget.reset();
    {
        let mut ctx = pipeline.interaction_context().unwrap();
        controller.handle(&InteractionEvent::ClipVolumeRender(&widget), &mut ctx);
    }
    pipeline.render().unwrap();
    assert_eq!(pipeline.volume().mapper().unwrap().clipping().planes().len(), 6);
    assert!(pipeline.frame().unwrap().max_alpha() > 0.0);
}

#[test]
fn interaction_switches_quality() {
    let shape = vector![6, 6, 6];
    let composite = composite_of(&solid_volume(shape, 40), &solid_volume(shape, 0));
    let mut pipeline = headless_pipeline(&quick_settings(), &composite);
    let mut controller = RenderSettings::default().controller();

    assert_eq!(pipeline.render().unwrap().quality, RenderQuality::Quality);

    {
        let mut ctx = pipeline.interaction_context().unwrap();
        controller.handle(&InteractionEvent::StartInteraction, &mut ctx);
    }
    let report = pipeline.render().unwrap();
    assert_eq!(report.quality, RenderQuality::Fast);
    assert_eq!(report.sample_distance, 2.0);

    let rerender = {
        let mut ctx = pipeline.interaction_context().unwrap();
        controller.handle(&InteractionEvent::EndInteraction, &mut ctx)
    };
    assert!(rerender);
    let report = pipeline.render().unwrap();
    assert_eq!(report.quality, RenderQuality::Quality);
    assert_eq!(report.sample_distance, 0.5);
}

#[test]
fn vol_bytes_read_back() {
    let volume = phantom_volume(vector![5, 6, 7]);
    let bytes = vol_file_bytes(&volume);

    let read = vol_reader::from_data_source(&DataSource::from_vec(bytes)).unwrap();
    assert_eq!(read, volume);
}

#[test]
fn mismatch_before_window() {
    let a = solid_volume(vector![4, 4, 4], 1);
    let b = solid_volume(vector![4, 4, 5], 1);
    let res = VolumeCompositor::default().composite(&a, &b);
    assert!(matches!(res, Err(VolumeError::DimensionMismatch { .. })));
}
