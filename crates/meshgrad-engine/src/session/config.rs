use std::time::Duration;

use meshgrad_gen::Preset;

use crate::coords::{AspectRatio, Viewport};
use crate::render::RendererConfig;

/// Fewest anchors a session will lay out.
pub const MIN_ANCHORS: usize = 3;

/// Initial parameters of a [`MeshGradient`](super::MeshGradient).
///
/// Every field has a working default; the `with_*` setters chain.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Anchors per generated batch. Clamped to `MIN_ANCHORS..=MAX_ANCHORS`.
    pub color_count: usize,

    pub preset: Preset,

    /// Shape of the canvas; the display height follows the container width.
    pub aspect_ratio: AspectRatio,

    /// Physical pixels per logical pixel.
    pub device_pixel_ratio: f32,

    /// Delay between a color-count/preset change and the regeneration.
    pub regenerate_delay: Duration,

    /// Delay between an aspect-ratio change and rescaling the anchors.
    pub relayout_delay: Duration,

    /// Initial container size, if the host already knows it.
    pub display: Option<Viewport>,

    /// Layout size used while the container size is unknown or empty.
    pub fallback_display: Viewport,

    /// Fixed RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    pub renderer: RendererConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            color_count: 5,
            preset: Preset::Random,
            aspect_ratio: AspectRatio::default(),
            device_pixel_ratio: 1.0,
            regenerate_delay: Duration::from_millis(100),
            relayout_delay: Duration::from_millis(300),
            display: None,
            fallback_display: Viewport::new(800.0, 600.0),
            seed: None,
            renderer: RendererConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn with_color_count(mut self, count: usize) -> Self {
        self.color_count = count;
        self
    }

    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.preset = preset;
        self
    }

    pub fn with_aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.aspect_ratio = ratio;
        self
    }

    pub fn with_device_pixel_ratio(mut self, dpr: f32) -> Self {
        self.device_pixel_ratio = dpr;
        self
    }

    pub fn with_display(mut self, display: Viewport) -> Self {
        self.display = Some(display);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_delays(mut self, regenerate: Duration, relayout: Duration) -> Self {
        self.regenerate_delay = regenerate;
        self.relayout_delay = relayout;
        self
    }

    pub fn with_renderer(mut self, renderer: RendererConfig) -> Self {
        self.renderer = renderer;
        self
    }
}
