//! Palette presets.
//!
//! Every batch contains at least one highlight (lightness ≥ 85 %): gradients
//! without a bright anchor read as muddy.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::colorspace::{wrap_hue, Hsl, Rgb8};
use crate::error::UnknownPreset;

/// Lightness (percent) a color must exceed to count as a highlight.
pub const HIGHLIGHT_LIGHTNESS: f32 = 85.0;

/// Width of the lightness band a forced highlight is drawn from.
const HIGHLIGHT_SPAN: f32 = 11.0;

/// Named palette-generation policy.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Preset {
    #[default]
    Random,
    Warm,
    Cool,
    Pastel,
    Neon,
    Earth,
    Sunset,
    Ocean,
    /// One hue for the whole batch; only saturation and lightness vary.
    Tonal,
    /// Two opposite hues, alternated then shuffled.
    Complementary,
}

impl Preset {
    pub const ALL: [Preset; 10] = [
        Preset::Random,
        Preset::Warm,
        Preset::Cool,
        Preset::Pastel,
        Preset::Neon,
        Preset::Earth,
        Preset::Sunset,
        Preset::Ocean,
        Preset::Tonal,
        Preset::Complementary,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Preset::Random => "random",
            Preset::Warm => "warm",
            Preset::Cool => "cool",
            Preset::Pastel => "pastel",
            Preset::Neon => "neon",
            Preset::Earth => "earth",
            Preset::Sunset => "sunset",
            Preset::Ocean => "ocean",
            Preset::Tonal => "tonal",
            Preset::Complementary => "complementary",
        }
    }

    /// Lenient lookup used for UI input: unknown names fall back to `Random`.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|err: UnknownPreset| {
            log::warn!("{err}; falling back to {}", Preset::Random);
            Preset::Random
        })
    }

    fn policy(self) -> Policy {
        let ranges = match self {
            Preset::Random => HslRanges::new((0.0, 360.0), (50.0, 100.0), (40.0, 75.0)),
            Preset::Warm => HslRanges::new((0.0, 60.0), (60.0, 100.0), (45.0, 70.0)),
            Preset::Cool => HslRanges::new((180.0, 280.0), (50.0, 90.0), (40.0, 70.0)),
            Preset::Pastel => HslRanges::new((0.0, 360.0), (40.0, 70.0), (70.0, 88.0)),
            Preset::Neon => HslRanges::new((0.0, 360.0), (90.0, 100.0), (50.0, 65.0)),
            Preset::Earth => HslRanges::new((20.0, 55.0), (30.0, 70.0), (30.0, 60.0)),
            // Crosses 360: magenta through orange.
            Preset::Sunset => HslRanges::new((340.0, 420.0), (65.0, 100.0), (45.0, 70.0)),
            Preset::Ocean => HslRanges::new((170.0, 230.0), (50.0, 95.0), (35.0, 65.0)),
            Preset::Tonal => return Policy::Tonal,
            Preset::Complementary => return Policy::Complementary,
        };
        Policy::Ranges(ranges)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(key))
            .ok_or_else(|| UnknownPreset(s.to_owned()))
    }
}

/// How a preset draws its colors.
#[derive(Debug, Copy, Clone, PartialEq)]
enum Policy {
    Ranges(HslRanges),
    Tonal,
    Complementary,
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct HslRanges {
    h: (f32, f32),
    s: (f32, f32),
    l: (f32, f32),
}

impl HslRanges {
    const fn new(h: (f32, f32), s: (f32, f32), l: (f32, f32)) -> Self {
        Self { h, s, l }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Hsl {
        Hsl::new(
            uniform(rng, self.h),
            uniform(rng, self.s),
            uniform(rng, self.l),
        )
    }
}

/// `lo + u * (hi - lo)` with `u ∈ [0, 1)`; a degenerate range returns `lo`.
#[inline]
fn uniform<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f32, f32)) -> f32 {
    lo + rng.random::<f32>() * (hi - lo)
}

/// Generates `count` HSL colors for `preset`, hue wrapped into `[0, 360)`.
///
/// At least one returned color has `l >= 85` when `count > 0`.
pub fn generate_hsl<R: Rng + ?Sized>(count: usize, preset: Preset, rng: &mut R) -> Vec<Hsl> {
    let mut colors: Vec<Hsl> = match preset.policy() {
        Policy::Ranges(ranges) => (0..count).map(|_| ranges.sample(rng)).collect(),
        Policy::Tonal => {
            let hue = uniform(rng, (0.0, 360.0));
            let ranges = HslRanges::new((hue, hue), (30.0, 85.0), (25.0, 85.0));
            (0..count).map(|_| ranges.sample(rng)).collect()
        }
        Policy::Complementary => {
            let hue1 = uniform(rng, (0.0, 360.0));
            let hue2 = (hue1 + 180.0) % 360.0;
            let mut batch: Vec<Hsl> = (0..count)
                .map(|i| {
                    let h = if i % 2 == 0 { hue1 } else { hue2 };
                    HslRanges::new((h, h), (40.0, 90.0), (30.0, 80.0)).sample(rng)
                })
                .collect();
            batch.shuffle(rng);
            batch
        }
    };

    ensure_highlight(&mut colors, rng);

    for c in &mut colors {
        c.h = wrap_hue(c.h);
    }
    colors
}

/// Generates `count` colors for `preset`, in generation order.
pub fn generate_colors<R: Rng + ?Sized>(count: usize, preset: Preset, rng: &mut R) -> Vec<Rgb8> {
    let colors: Vec<Rgb8> = generate_hsl(count, preset, rng)
        .into_iter()
        .map(Hsl::to_rgb8)
        .collect();
    log::debug!("generated {} colors with {preset} preset", colors.len());
    colors
}

fn ensure_highlight<R: Rng + ?Sized>(colors: &mut [Hsl], rng: &mut R) {
    if colors.is_empty() || colors.iter().any(|c| c.l > HIGHLIGHT_LIGHTNESS) {
        return;
    }
    let idx = rng.random_range(0..colors.len());
    colors[idx].l = HIGHLIGHT_LIGHTNESS + rng.random::<f32>() * HIGHLIGHT_SPAN;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorspace::rgb_to_hsl;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    // ── names ─────────────────────────────────────────────────────────────

    #[test]
    fn names_round_trip() {
        for p in Preset::ALL {
            assert_eq!(p.name().parse::<Preset>(), Ok(p));
        }
        assert_eq!(" Ocean ".parse::<Preset>(), Ok(Preset::Ocean));
    }

    #[test]
    fn unknown_name_falls_back_to_random() {
        assert!("plaid".parse::<Preset>().is_err());
        assert_eq!(Preset::from_name("plaid"), Preset::Random);
    }

    // ── counts + highlight ────────────────────────────────────────────────

    #[test]
    fn every_preset_returns_count_with_highlight() {
        let mut r = rng(1);
        for preset in Preset::ALL {
            for n in 1..=16 {
                for _ in 0..8 {
                    let hsl = generate_hsl(n, preset, &mut r);
                    assert_eq!(hsl.len(), n);
                    assert!(
                        hsl.iter().any(|c| c.l >= HIGHLIGHT_LIGHTNESS),
                        "{preset} n={n}: {hsl:?}"
                    );
                    assert!(hsl.iter().all(|c| (0.0..360.0).contains(&c.h)));
                }
            }
        }
    }

    #[test]
    fn highlight_survives_hex_conversion() {
        let mut r = rng(2);
        for preset in Preset::ALL {
            for n in 1..=16 {
                let colors = generate_colors(n, preset, &mut r);
                assert_eq!(colors.len(), n);
                let brightest = colors
                    .iter()
                    .map(|c| rgb_to_hsl(*c).l)
                    .fold(f32::MIN, f32::max);
                // One 8-bit step moves lightness by at most ~0.2 %.
                assert!(brightest >= HIGHLIGHT_LIGHTNESS - 0.5, "{preset} n={n}: {brightest}");
            }
        }
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(generate_colors(0, Preset::Neon, &mut rng(3)).is_empty());
    }

    #[test]
    fn forced_highlight_stays_in_band() {
        let mut r = rng(4);
        let mut colors = vec![Hsl::new(10.0, 50.0, 40.0); 6];
        ensure_highlight(&mut colors, &mut r);
        let bright: Vec<_> = colors.iter().filter(|c| c.l != 40.0).collect();
        assert_eq!(bright.len(), 1);
        assert!((85.0..=96.0).contains(&bright[0].l));
    }

    // ── ranges ────────────────────────────────────────────────────────────

    #[test]
    fn range_presets_respect_saturation_and_hue() {
        let mut r = rng(5);
        for _ in 0..50 {
            for c in generate_hsl(8, Preset::Cool, &mut r) {
                assert!((180.0..=280.0).contains(&c.h), "{c:?}");
                assert!((50.0..=90.0).contains(&c.s), "{c:?}");
            }
        }
    }

    #[test]
    fn sunset_hues_wrap_past_red() {
        let mut r = rng(6);
        for _ in 0..50 {
            for c in generate_hsl(8, Preset::Sunset, &mut r) {
                assert!(c.h >= 340.0 || c.h <= 60.0, "{c:?}");
            }
        }
    }

    // ── relational presets ────────────────────────────────────────────────

    #[test]
    fn tonal_shares_one_hue() {
        let mut r = rng(7);
        for n in 1..=16 {
            let batch = generate_hsl(n, Preset::Tonal, &mut r);
            let h0 = batch[0].h;
            assert!(batch.iter().all(|c| (c.h - h0).abs() < 1e-3), "{batch:?}");
        }
    }

    #[test]
    fn complementary_splits_evenly_between_opposite_hues() {
        let mut r = rng(8);
        for n in (2..=16).step_by(2) {
            let batch = generate_hsl(n, Preset::Complementary, &mut r);
            let hue1 = batch[0].h;
            let hue2 = (hue1 + 180.0) % 360.0;
            let near = |a: f32, b: f32| (a - b).abs() < 1e-2 || (a - b).abs() > 360.0 - 1e-2;

            let a = batch.iter().filter(|c| near(c.h, hue1)).count();
            let b = batch.iter().filter(|c| near(c.h, hue2)).count();
            assert_eq!(a, n / 2, "{batch:?}");
            assert_eq!(b, n / 2, "{batch:?}");
        }
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let a = generate_colors(6, Preset::Pastel, &mut rng(9));
        let b = generate_colors(6, Preset::Pastel, &mut rng(9));
        assert_eq!(a, b);
    }
}
