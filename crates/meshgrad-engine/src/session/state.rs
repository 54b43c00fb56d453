use std::time::Instant;

use meshgrad_gen::{generate_colors, layout_points, rescale_points, AnchorPoint, Preset, Rgb8};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::coords::{AspectRatio, CanvasSize, Viewport};
use crate::render::MAX_ANCHORS;
use crate::time::Debouncer;

use super::config::{SessionConfig, MIN_ANCHORS};

/// Everything a session knows except GPU objects.
///
/// Mutations only record what changed; drawing is left to the owner, which
/// checks [`needs_draw`](Self::needs_draw) once per tick.
pub(crate) struct SessionState {
    color_count: usize,
    preset: Preset,
    aspect_ratio: AspectRatio,
    device_pixel_ratio: f32,

    /// Last container size reported by the host.
    display: Option<Viewport>,
    fallback_display: Viewport,
    /// Display size the current points are positioned for.
    layout_basis: Viewport,

    points: Vec<AnchorPoint>,
    rng: StdRng,

    regenerate: Debouncer<()>,
    relayout: Debouncer<()>,
    needs_draw: bool,
}

impl SessionState {
    pub(crate) fn new(config: &SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut state = Self {
            color_count: clamp_count(config.color_count),
            preset: config.preset,
            aspect_ratio: config.aspect_ratio,
            device_pixel_ratio: 1.0,
            display: config.display.filter(|d| d.is_valid()),
            fallback_display: config.fallback_display,
            layout_basis: config.fallback_display,
            points: Vec::new(),
            rng,
            regenerate: Debouncer::new(config.regenerate_delay),
            relayout: Debouncer::new(config.relayout_delay),
            needs_draw: false,
        };
        state.set_device_pixel_ratio(config.device_pixel_ratio);
        state.regenerate();
        state
    }

    // ── accessors ──────────────────────────────────────────────────────────

    #[inline]
    pub(crate) fn points(&self) -> &[AnchorPoint] {
        &self.points
    }

    #[inline]
    pub(crate) fn color_count(&self) -> usize {
        self.color_count
    }

    #[inline]
    pub(crate) fn preset(&self) -> Preset {
        self.preset
    }

    #[inline]
    pub(crate) fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    #[inline]
    pub(crate) fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    #[inline]
    pub(crate) fn display(&self) -> Option<Viewport> {
        self.display
    }

    /// Container size, or the fallback while it is unknown.
    pub(crate) fn layout_display(&self) -> Viewport {
        self.display.unwrap_or(self.fallback_display)
    }

    /// Canvas to draw into. `None` until the host reports a container size.
    pub(crate) fn canvas(&self) -> Option<CanvasSize> {
        self.display
            .map(|d| CanvasSize::from_display(d, self.device_pixel_ratio))
    }

    #[inline]
    pub(crate) fn needs_draw(&self) -> bool {
        self.needs_draw
    }

    pub(crate) fn mark_drawn(&mut self) {
        self.needs_draw = false;
    }

    /// Earliest pending debounce deadline.
    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        match (self.regenerate.deadline(), self.relayout.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // ── mutations ──────────────────────────────────────────────────────────

    /// Replaces every point with a fresh batch laid out over the current
    /// display (or the fallback size). Cancels any pending regeneration.
    pub(crate) fn regenerate(&mut self) {
        self.regenerate.cancel();

        let size = self.layout_display();
        let colors = generate_colors(self.color_count, self.preset, &mut self.rng);
        match layout_points(&colors, size.width, size.height, &mut self.rng) {
            Ok(points) => {
                self.points = points;
                self.layout_basis = size;
                self.needs_draw = true;
                log::info!(
                    "regenerated {} anchors ({}) for {}x{}",
                    self.points.len(),
                    self.preset,
                    size.width,
                    size.height
                );
            }
            Err(err) => log::warn!("regeneration skipped: {err}"),
        }
    }

    pub(crate) fn request_regenerate(&mut self, now: Instant) {
        if self.regenerate.schedule(now, ()) {
            log::trace!("pending regeneration superseded");
        }
    }

    /// Returns the clamped count actually used.
    pub(crate) fn set_color_count(&mut self, count: usize, now: Instant) -> usize {
        let clamped = clamp_count(count);
        if clamped != count {
            log::debug!("color count {count} clamped to {clamped}");
        }
        if clamped != self.color_count {
            self.color_count = clamped;
            self.request_regenerate(now);
        }
        clamped
    }

    pub(crate) fn set_preset(&mut self, preset: Preset, now: Instant) {
        if preset != self.preset {
            self.preset = preset;
            self.request_regenerate(now);
        }
    }

    /// Reshapes the display to `ratio` at the current width, then schedules
    /// the anchors to follow.
    pub(crate) fn set_aspect_ratio(&mut self, ratio: AspectRatio, now: Instant) {
        if ratio == self.aspect_ratio {
            return;
        }
        self.aspect_ratio = ratio;
        if let Some(display) = self.display {
            self.display = Some(ratio.fit_width(display.width));
            self.needs_draw = true;
        }
        if !self.points.is_empty() {
            self.relayout.schedule(now, ());
        }
    }

    /// Records the container's display size. Returns `false` and keeps the
    /// old size when `display` is empty or non-finite.
    ///
    /// Points are rescaled by new/old so they keep their relative positions;
    /// before the first report the old size is the fallback layout size.
    pub(crate) fn resize(&mut self, display: Viewport) -> bool {
        if !display.is_valid() {
            log::debug!("ignoring resize to {}x{}", display.width, display.height);
            return false;
        }
        self.display = Some(display);
        self.rescale_to(display);
        self.needs_draw = true;
        true
    }

    pub(crate) fn set_device_pixel_ratio(&mut self, dpr: f32) {
        if dpr.is_finite() && dpr > 0.0 {
            if dpr != self.device_pixel_ratio {
                self.device_pixel_ratio = dpr;
                self.needs_draw = true;
            }
        } else {
            log::warn!("ignoring device pixel ratio {dpr}");
        }
    }

    /// Swaps one anchor's color. Returns `false` for an out-of-range index.
    pub(crate) fn set_point_color(&mut self, index: usize, color: Rgb8) -> bool {
        let Some(point) = self.points.get_mut(index) else {
            log::warn!("no anchor at index {index} ({} anchors)", self.points.len());
            return false;
        };
        point.color = color;
        self.needs_draw = true;
        true
    }

    /// Runs whichever debounced actions are due at `now`.
    pub(crate) fn poll(&mut self, now: Instant) {
        if self.regenerate.poll(now).is_some() {
            self.regenerate();
        }
        if self.relayout.poll(now).is_some() {
            self.rescale_to(self.layout_display());
        }
    }

    fn rescale_to(&mut self, target: Viewport) {
        if target == self.layout_basis {
            return;
        }
        if rescale_points(&mut self.points, self.layout_basis.as_tuple(), target.as_tuple()) {
            log::debug!(
                "rescaled {} anchors {}x{} -> {}x{}",
                self.points.len(),
                self.layout_basis.width,
                self.layout_basis.height,
                target.width,
                target.height
            );
            self.layout_basis = target;
            self.needs_draw = true;
        }
    }
}

fn clamp_count(count: usize) -> usize {
    count.clamp(MIN_ANCHORS, MAX_ANCHORS)
}
