use super::Viewport;

/// Backing-store size in physical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Tightly packed RGBA8 byte count.
    #[inline]
    pub const fn rgba_len(self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// A display size together with the backing-store resolution it maps to.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CanvasSize {
    pub display: Viewport,
    pub pixels: PixelSize,
}

impl CanvasSize {
    #[inline]
    pub const fn new(display: Viewport, pixels: PixelSize) -> Self {
        Self { display, pixels }
    }

    /// `pixels = floor(display * device_pixel_ratio)`.
    ///
    /// A non-positive or non-finite ratio is treated as 1.
    pub fn from_display(display: Viewport, device_pixel_ratio: f32) -> Self {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        let to_px = |v: f32| {
            if v.is_finite() && v > 0.0 { (v * dpr).floor() as u32 } else { 0 }
        };
        Self {
            display,
            pixels: PixelSize::new(to_px(display.width), to_px(display.height)),
        }
    }

    /// Both sizes non-empty.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.display.is_valid() && !self.pixels.is_empty()
    }
}
