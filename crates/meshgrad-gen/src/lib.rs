//! Procedural inputs for mesh gradients: colors and anchor points.
//!
//! This crate has no GPU code. It produces the ordered anchor list that
//! `meshgrad-engine` uploads to its shader.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`colorspace`] | `Rgb8`, `Hsl`, HSL ⇄ RGB and hex conversions |
//! | [`palette`] | `Preset`, `generate_colors`, `generate_hsl` |
//! | [`layout`] | `AnchorPoint`, `layout_points`, `rescale_points` |
//! | [`error`] | `HexColorError`, `UnknownPreset`, `InvalidDimensions` |
//!
//! # Quick start
//!
//! ```rust
//! use meshgrad_gen::{generate_colors, layout_points, Preset};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let colors = generate_colors(5, Preset::Ocean, &mut rng);
//! let points = layout_points(&colors, 800.0, 500.0, &mut rng).unwrap();
//! assert_eq!(points.len(), 5);
//! ```

pub mod colorspace;
pub mod error;
pub mod layout;
pub mod palette;

pub use colorspace::{hex_to_normalized_rgb, hsl_to_hex, hsl_to_rgb8, rgb_to_hsl, Hsl, Rgb8};
pub use error::{HexColorError, InvalidDimensions, UnknownPreset};
pub use layout::{layout_points, rescale_points, AnchorPoint};
pub use palette::{generate_colors, generate_hsl, Preset};
