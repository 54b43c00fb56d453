#![allow(dead_code)]

use meshgrad_engine::device::{Gpu, GpuInit};
use meshgrad_engine::logging::{init_logging, LoggingConfig};
use meshgrad_engine::generate::{AnchorPoint, Rgb8};

/// Headless device, or `None` (with a note on stderr) on machines without one.
pub fn gpu() -> Option<Gpu> {
    init_logging(LoggingConfig {
        env_filter: Some("meshgrad_engine=debug,warn".into()),
        is_test: true,
        ..LoggingConfig::default()
    });

    let hw = Gpu::request(GpuInit::default());
    let gpu = hw.or_else(|_| {
        Gpu::request(GpuInit {
            force_fallback_adapter: true,
            ..GpuInit::default()
        })
    });
    match gpu {
        Ok(gpu) => Some(gpu),
        Err(err) => {
            eprintln!("skipping GPU test: {err}");
            None
        }
    }
}

pub fn anchor(x: f32, y: f32, color: Rgb8) -> AnchorPoint {
    AnchorPoint::new(x, y, 10.0, color)
}

/// RGBA of pixel (x, y) in tightly packed rows.
pub fn pixel(rgba: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * width + x) * 4) as usize;
    [rgba[i], rgba[i + 1], rgba[i + 2], rgba[i + 3]]
}

pub fn luma(px: [u8; 4]) -> u32 {
    px[0] as u32 + px[1] as u32 + px[2] as u32
}

pub fn close(a: u8, b: u8) -> bool {
    a.abs_diff(b) <= 1
}
