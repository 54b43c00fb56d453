//! GPU rendering subsystem.
//!
//! One renderer, [`GradientRenderer`], draws a full-screen quad whose fragment
//! shader blends anchor colors by inverse-distance weighting.
//!
//! Convention:
//! - Anchor positions are in logical display pixels (top-left origin, +Y down).
//! - The shader sees them as UV with +V up, so the backing store is bottom-up
//!   and exported images are flipped back to top-down.

mod backing;
mod common;
mod ctx;
mod error;
mod gradient;
mod readback;
mod shader;

pub use common::MAX_ANCHORS;
pub use ctx::RenderCtx;
pub use error::RenderError;
pub use gradient::{GradientRenderer, RendererConfig};
