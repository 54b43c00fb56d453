mod common;

use std::time::{Duration, Instant};

use common::gpu;
use meshgrad_engine::coords::{AspectRatio, Viewport};
use meshgrad_engine::generate::{Preset, Rgb8};
use meshgrad_engine::session::{MeshGradient, SessionConfig, EXPORT_FILE_NAME};

fn config() -> SessionConfig {
    SessionConfig::default()
        .with_seed(11)
        .with_display(Viewport::new(160.0, 100.0))
}

#[test]
fn tick_draws_once_per_change() {
    let Some(gpu) = gpu() else { return };
    let ctx = gpu.render_ctx();
    let mut mg = MeshGradient::new(&ctx, config()).unwrap();
    let t0 = Instant::now();

    assert!(mg.tick(&ctx, t0).unwrap());
    assert!(!mg.tick(&ctx, t0).unwrap());

    mg.set_point_color(0, Rgb8::WHITE);
    assert!(mg.tick(&ctx, t0).unwrap());
    assert_eq!(mg.points()[0].color, Rgb8::WHITE);
}

#[test]
fn debounced_preset_change_regenerates() {
    let Some(gpu) = gpu() else { return };
    let ctx = gpu.render_ctx();
    let mut mg = MeshGradient::new(&ctx, config()).unwrap();
    let t0 = Instant::now();
    mg.tick(&ctx, t0).unwrap();

    mg.set_preset(Preset::Pastel, t0);
    mg.set_color_count(8, t0 + Duration::from_millis(40));
    assert!(!mg.tick(&ctx, t0 + Duration::from_millis(100)).unwrap());

    let due = mg.next_deadline().unwrap();
    assert!(mg.tick(&ctx, due).unwrap());
    assert_eq!(mg.points().len(), 8);
    assert_eq!(mg.preset(), Preset::Pastel);
}

#[test]
fn aspect_change_resizes_backing_store_and_rescales() {
    let Some(gpu) = gpu() else { return };
    let ctx = gpu.render_ctx();
    let mut mg = MeshGradient::new(&ctx, config().with_device_pixel_ratio(2.0)).unwrap();
    let t0 = Instant::now();
    mg.tick(&ctx, t0).unwrap();
    let before = mg.points().to_vec();

    mg.set_aspect_ratio("2/1".parse::<AspectRatio>().unwrap(), t0);
    assert!(mg.tick(&ctx, t0).unwrap());
    assert_eq!(mg.renderer().pixel_size().map(|p| (p.width, p.height)), Some((320, 160)));
    assert_eq!(mg.points(), &before[..]);

    mg.tick(&ctx, t0 + Duration::from_millis(300)).unwrap();
    for (a, b) in before.iter().zip(mg.points()) {
        assert!((b.y - a.y * 80.0 / 100.0).abs() < 1e-3);
    }
}

#[test]
fn export_produces_png_at_backing_resolution() {
    let Some(gpu) = gpu() else { return };
    let ctx = gpu.render_ctx();
    let mut mg = MeshGradient::new(&ctx, config().with_device_pixel_ratio(1.5)).unwrap();
    mg.tick(&ctx, Instant::now()).unwrap();

    let png = mg.export_png(&ctx).unwrap();
    let img = image::load_from_memory(&png).unwrap();
    assert_eq!((img.width(), img.height()), (240, 150));
    assert!(EXPORT_FILE_NAME.ends_with(".png"));

    mg.destroy();
    assert!(mg.export_png(&ctx).is_none());
}

#[test]
fn failed_draw_is_not_repeated_without_new_input() {
    let Some(gpu) = gpu() else { return };
    let ctx = gpu.render_ctx();
    let mut mg = MeshGradient::new(&ctx, config()).unwrap();
    let t0 = Instant::now();

    let lost = gpu.render_ctx().with_context_lost(true);
    assert!(mg.tick(&lost, t0).is_err());
    assert!(!mg.needs_draw());
    assert_eq!(mg.tick(&lost, t0 + Duration::from_millis(16)), Ok(false));

    // fresh input asks for a frame again
    mg.set_point_color(0, Rgb8::BLACK);
    assert!(mg.needs_draw());
    assert!(mg.tick(&ctx, t0 + Duration::from_millis(32)).unwrap());
}
