//! Anchor point scattering and resize-relative rescaling.

use rand::Rng;

use crate::colorspace::Rgb8;
use crate::error::InvalidDimensions;

/// Fraction of the longer canvas side bounding an anchor's falloff radius.
pub const RADIUS_FACTOR_MIN: f32 = 0.35;
pub const RADIUS_FACTOR_MAX: f32 = 0.70;

/// A colored control point in display-space pixels (top-left origin, +Y down).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnchorPoint {
    pub x: f32,
    pub y: f32,
    /// Influence falloff distance. Informational: the shader weights by
    /// distance alone.
    pub radius: f32,
    pub color: Rgb8,
}

impl AnchorPoint {
    #[inline]
    pub const fn new(x: f32, y: f32, radius: f32, color: Rgb8) -> Self {
        Self { x, y, radius, color }
    }
}

/// Scatters one point per color uniformly over a `width × height` canvas.
///
/// Output order matches `colors`.
pub fn layout_points<R: Rng + ?Sized>(
    colors: &[Rgb8],
    width: f32,
    height: f32,
    rng: &mut R,
) -> Result<Vec<AnchorPoint>, InvalidDimensions> {
    InvalidDimensions::check(width, height)?;

    let longest = width.max(height);
    let span = RADIUS_FACTOR_MAX - RADIUS_FACTOR_MIN;

    Ok(colors
        .iter()
        .map(|&color| {
            let x = rng.random::<f32>() * width;
            let y = rng.random::<f32>() * height;
            let radius = longest * (RADIUS_FACTOR_MIN + rng.random::<f32>() * span);
            AnchorPoint::new(x, y, radius, color)
        })
        .collect())
}

/// Moves points from an `old` canvas to a `new` one, keeping relative layout.
///
/// `x' = x * new_w / old_w`, `y' = y * new_h / old_h`. Radius and color are
/// untouched. Returns `false` (leaving points as-is) if either size is invalid.
pub fn rescale_points(points: &mut [AnchorPoint], old: (f32, f32), new: (f32, f32)) -> bool {
    if InvalidDimensions::check(old.0, old.1).is_err()
        || InvalidDimensions::check(new.0, new.1).is_err()
    {
        log::warn!(
            "skipping rescale from {}x{} to {}x{}",
            old.0, old.1, new.0, new.1
        );
        return false;
    }

    for p in points.iter_mut() {
        p.x = p.x * new.0 / old.0;
        p.y = p.y * new.1 / old.1;
    }
    true
}
