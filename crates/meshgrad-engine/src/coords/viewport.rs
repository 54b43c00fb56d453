/// Display size in logical pixels.
///
/// Anchor positions are divided by this size to get shader UV coordinates.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// `(width, height)` tuple, the form `meshgrad_gen::rescale_points` takes.
    #[inline]
    pub fn as_tuple(self) -> (f32, f32) {
        (self.width, self.height)
    }
}
