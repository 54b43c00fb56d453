//! Session orchestration.
//!
//! [`MeshGradient`] is the single owner of the anchor list, canvas sizes,
//! random source, debouncers and renderer. Hosts forward input events to it
//! and call [`tick`](MeshGradient::tick) from their loop; each tick performs
//! at most one redraw.

mod config;
mod state;

use std::time::Instant;

use meshgrad_gen::{AnchorPoint, Preset, Rgb8};

use crate::coords::{AspectRatio, CanvasSize, Viewport};
use crate::render::{GradientRenderer, RenderCtx, RenderError};

pub use config::{SessionConfig, MIN_ANCHORS};
pub use crate::export::EXPORT_FILE_NAME;

use state::SessionState;

pub struct MeshGradient {
    state: SessionState,
    renderer: GradientRenderer,
}

impl MeshGradient {
    /// Builds the renderer and lays out the first batch of anchors.
    pub fn new(ctx: &RenderCtx<'_>, config: SessionConfig) -> Result<Self, RenderError> {
        let renderer = GradientRenderer::create(ctx, config.renderer)?;
        Ok(Self {
            state: SessionState::new(&config),
            renderer,
        })
    }

    /// Anchors in swatch order.
    #[inline]
    pub fn points(&self) -> &[AnchorPoint] {
        self.state.points()
    }

    #[inline]
    pub fn color_count(&self) -> usize {
        self.state.color_count()
    }

    #[inline]
    pub fn preset(&self) -> Preset {
        self.state.preset()
    }

    #[inline]
    pub fn aspect_ratio(&self) -> AspectRatio {
        self.state.aspect_ratio()
    }

    #[inline]
    pub fn device_pixel_ratio(&self) -> f32 {
        self.state.device_pixel_ratio()
    }

    /// Container size last reported through [`resize`](Self::resize).
    #[inline]
    pub fn display(&self) -> Option<Viewport> {
        self.state.display()
    }

    /// Canvas the next draw will use, once the container size is known.
    #[inline]
    pub fn canvas(&self) -> Option<CanvasSize> {
        self.state.canvas()
    }

    #[inline]
    pub fn needs_draw(&self) -> bool {
        self.state.needs_draw()
    }

    /// When the host should tick next to fire a pending update.
    #[inline]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.state.next_deadline()
    }

    #[inline]
    pub fn renderer(&self) -> &GradientRenderer {
        &self.renderer
    }

    // ── input surface ──────────────────────────────────────────────────────

    /// Schedules a regeneration; returns the count after clamping to
    /// `MIN_ANCHORS..=MAX_ANCHORS`.
    pub fn set_color_count(&mut self, count: usize, now: Instant) -> usize {
        self.state.set_color_count(count, now)
    }

    pub fn set_preset(&mut self, preset: Preset, now: Instant) {
        self.state.set_preset(preset, now);
    }

    pub fn set_aspect_ratio(&mut self, ratio: AspectRatio, now: Instant) {
        self.state.set_aspect_ratio(ratio, now);
    }

    /// Records a new container size; the next tick redraws at it.
    pub fn resize(&mut self, display: Viewport) -> bool {
        self.state.resize(display)
    }

    pub fn set_device_pixel_ratio(&mut self, dpr: f32) {
        self.state.set_device_pixel_ratio(dpr);
    }

    pub fn set_point_color(&mut self, index: usize, color: Rgb8) -> bool {
        self.state.set_point_color(index, color)
    }

    /// New palette and layout right away (the generate button / key).
    pub fn regenerate(&mut self) {
        self.state.regenerate();
    }

    /// Debounced form of [`regenerate`](Self::regenerate).
    pub fn request_regenerate(&mut self, now: Instant) {
        self.state.request_regenerate(now);
    }

    // ── output surface ─────────────────────────────────────────────────────

    /// Fires due updates, then redraws if anything changed.
    ///
    /// Returns whether a frame was drawn.
    pub fn tick(&mut self, ctx: &RenderCtx<'_>, now: Instant) -> Result<bool, RenderError> {
        self.state.poll(now);
        if !self.state.needs_draw() {
            return Ok(false);
        }
        self.redraw(ctx)
    }

    /// Draws the current anchors now. Returns `false` while the container
    /// size is unknown.
    ///
    /// A failed draw still clears the pending change; the next input event
    /// or an explicit `redraw` tries again.
    pub fn redraw(&mut self, ctx: &RenderCtx<'_>) -> Result<bool, RenderError> {
        let Some(canvas) = self.state.canvas() else {
            return Ok(false);
        };
        let drawn = self.renderer.draw(ctx, self.state.points(), canvas);
        self.state.mark_drawn();
        drawn.map(|()| true)
    }

    /// Current gradient as PNG bytes, meant to be saved as
    /// [`EXPORT_FILE_NAME`]. `None` if anything fails; the cause is logged.
    pub fn export_png(&mut self, ctx: &RenderCtx<'_>) -> Option<Vec<u8>> {
        self.renderer.export_png(
            ctx,
            self.state.points(),
            self.state.layout_display(),
            self.state.device_pixel_ratio(),
        )
    }

    /// Releases GPU resources. Later draws fail with `ContextUnavailable`.
    pub fn destroy(&mut self) {
        self.renderer.destroy();
    }
}
