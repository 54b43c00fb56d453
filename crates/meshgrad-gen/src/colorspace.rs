//! HSL / RGB / hex conversions.
//!
//! Hue is in degrees, saturation and lightness in percent, matching the
//! ranges palette presets are written in.

use std::fmt;
use std::str::FromStr;

use crate::error::HexColorError;

/// 8-bit sRGB color without alpha.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb`, `rrggbb`, `#rgb` or `rgb`.
    ///
    /// Anything else is rejected, including the 4- and 8-digit alpha forms.
    pub fn from_hex(hex: &str) -> Result<Self, HexColorError> {
        let digits = hex.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if digits.is_empty() {
            return Err(HexColorError::Empty);
        }
        if let Some(c) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(HexColorError::InvalidDigit(c));
        }

        // All chars are ASCII hex digits, so byte indexing is safe below.
        let nibble = |i: usize| -> u8 {
            match digits.as_bytes()[i] {
                b @ b'0'..=b'9' => b - b'0',
                b @ b'a'..=b'f' => b - b'a' + 10,
                b => b - b'A' + 10,
            }
        };

        match digits.len() {
            3 => Ok(Self::new(nibble(0) * 17, nibble(1) * 17, nibble(2) * 17)),
            6 => Ok(Self::new(
                nibble(0) << 4 | nibble(1),
                nibble(2) << 4 | nibble(3),
                nibble(4) << 4 | nibble(5),
            )),
            n => Err(HexColorError::InvalidLength(n)),
        }
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels divided by 255.
    #[inline]
    pub fn to_normalized(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Relative lightness in percent, as used by the highlight rule.
    #[inline]
    pub fn lightness(self) -> f32 {
        rgb_to_hsl(self).l
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb8 {
    type Err = HexColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// HSL triple: `h` in degrees, `s` and `l` in percent.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    #[inline]
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// Same color with the hue wrapped into `[0, 360)`.
    #[inline]
    pub fn normalized(self) -> Self {
        Self { h: wrap_hue(self.h), ..self }
    }

    #[inline]
    pub fn to_rgb8(self) -> Rgb8 {
        hsl_to_rgb8(self.h, self.s, self.l)
    }

    #[inline]
    pub fn to_hex(self) -> String {
        self.to_rgb8().to_hex()
    }
}

#[inline]
pub(crate) fn wrap_hue(h: f32) -> f32 {
    let h = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if h >= 360.0 { 0.0 } else { h }
}

/// Unrounded RGB channels in `[0, 1]`.
fn hsl_to_unit_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = wrap_hue(h);
    let s = s.clamp(0.0, 100.0) / 100.0;
    let l = l.clamp(0.0, 100.0) / 100.0;
    let a = s * l.min(1.0 - l);
    let f = |n: f32| {
        let k = (n + h / 30.0) % 12.0;
        l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0)
    };
    [f(0.0), f(8.0), f(4.0)]
}

/// HSL to 8-bit RGB, each channel rounded to nearest.
pub fn hsl_to_rgb8(h: f32, s: f32, l: f32) -> Rgb8 {
    let [r, g, b] = hsl_to_unit_rgb(h, s, l);
    let to_u8 = |c: f32| (c * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb8::new(to_u8(r), to_u8(g), to_u8(b))
}

/// HSL to a lowercase `#rrggbb` string.
pub fn hsl_to_hex(h: f32, s: f32, l: f32) -> String {
    hsl_to_rgb8(h, s, l).to_hex()
}

/// Hex string to RGB channels in `[0, 1]`.
///
/// Malformed input never fails: it is logged and read as black.
/// Use [`Rgb8::from_hex`] to reject instead.
pub fn hex_to_normalized_rgb(hex: &str) -> [f32; 3] {
    match Rgb8::from_hex(hex) {
        Ok(c) => c.to_normalized(),
        Err(err) => {
            log::warn!("{err} in {hex:?}; using black");
            Rgb8::BLACK.to_normalized()
        }
    }
}

/// 8-bit RGB back to HSL (hue 0 for greys).
pub fn rgb_to_hsl(c: Rgb8) -> Hsl {
    let [r, g, b] = c.to_normalized();
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let d = max - min;

    if d <= f32::EPSILON {
        return Hsl::new(0.0, 0.0, l * 100.0);
    }

    let s = d / (1.0 - (2.0 * l - 1.0).abs());
    let h = if max == r {
        60.0 * ((g - b) / d)
    } else if max == g {
        60.0 * ((b - r) / d + 2.0)
    } else {
        60.0 * ((r - g) / d + 4.0)
    };

    Hsl::new(wrap_hue(h), s * 100.0, l * 100.0)
}
