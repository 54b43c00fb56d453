use std::fmt;
use std::str::FromStr;

use super::Viewport;

/// Width-to-height ratio of the rendering surface.
///
/// Parses `"16/10"`, `"16:9"` or a plain number such as `"1.5"`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AspectRatio {
    pub width: f32,
    pub height: f32,
}

impl AspectRatio {
    /// Returns `None` unless both terms are finite and positive.
    pub fn new(width: f32, height: f32) -> Option<Self> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        (ok(width) && ok(height)).then_some(Self { width, height })
    }

    #[inline]
    pub fn ratio(self) -> f32 {
        self.width / self.height
    }

    /// Display size of a container `width` wide with this ratio.
    #[inline]
    pub fn fit_width(self, width: f32) -> Viewport {
        Viewport::new(width, width / self.ratio())
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self { width: 16.0, height: 10.0 }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.width, self.height)
    }
}

/// An aspect ratio string that is not `w/h`, `w:h` or a positive number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidAspectRatio(pub String);

impl fmt::Display for InvalidAspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid aspect ratio {:?}", self.0)
    }
}

impl std::error::Error for InvalidAspectRatio {}

impl FromStr for AspectRatio {
    type Err = InvalidAspectRatio;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || InvalidAspectRatio(s.to_owned());
        let num = |t: &str| t.trim().parse::<f32>().map_err(|_| err());

        let (w, h) = match s.split_once(['/', ':']) {
            Some((w, h)) => (num(w)?, num(h)?),
            None => (num(s)?, 1.0),
        };
        Self::new(w, h).ok_or_else(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_slash_colon_and_plain() {
        assert_eq!("16/10".parse(), Ok(AspectRatio { width: 16.0, height: 10.0 }));
        assert_eq!(" 4 : 3 ".parse(), Ok(AspectRatio { width: 4.0, height: 3.0 }));
        assert_eq!("1.5".parse(), Ok(AspectRatio { width: 1.5, height: 1.0 }));
    }

    #[test]
    fn rejects_zero_and_garbage() {
        assert!("16/0".parse::<AspectRatio>().is_err());
        assert!("wide".parse::<AspectRatio>().is_err());
        assert!("-1".parse::<AspectRatio>().is_err());
        assert!("".parse::<AspectRatio>().is_err());
    }

    #[test]
    fn fit_width_derives_height() {
        let r: AspectRatio = "16/9".parse().unwrap();
        let v = r.fit_width(1600.0);
        assert_eq!(v.width, 1600.0);
        assert_eq!(v.height, 900.0);
    }
}
