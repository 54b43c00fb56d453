use std::fmt;

/// A hex color string that is not 3 or 6 hex digits (optionally `#`-prefixed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HexColorError {
    Empty,
    /// Digit count other than 3 or 6. Alpha forms (4 / 8 digits) land here.
    InvalidLength(usize),
    InvalidDigit(char),
}

impl fmt::Display for HexColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty hex color"),
            Self::InvalidLength(n) => {
                write!(f, "hex color must have 3 or 6 digits, got {n}")
            }
            Self::InvalidDigit(c) => write!(f, "invalid hex digit {c:?}"),
        }
    }
}

impl std::error::Error for HexColorError {}

/// A palette preset name that matches none of the known presets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPreset(pub String);

impl fmt::Display for UnknownPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown palette preset {:?}", self.0)
    }
}

impl std::error::Error for UnknownPreset {}

/// Canvas dimensions that are zero, negative, or not finite.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InvalidDimensions {
    pub width: f32,
    pub height: f32,
}

impl InvalidDimensions {
    /// Returns `Err` unless both sides are finite and strictly positive.
    pub fn check(width: f32, height: f32) -> Result<(), Self> {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok(())
        } else {
            Err(Self { width, height })
        }
    }
}

impl fmt::Display for InvalidDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid canvas dimensions {}x{}", self.width, self.height)
    }
}

impl std::error::Error for InvalidDimensions {}
