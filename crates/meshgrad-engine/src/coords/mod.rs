//! Canvas size types.
//!
//! Two spaces are in play:
//! - display (logical) pixels: where anchor points live, origin top-left, +Y down
//! - backing-store (physical) pixels: what the GPU renders and reads back
//!
//! `CanvasSize` keeps the pair together so they cannot drift apart.

mod aspect;
mod canvas;
mod viewport;

pub use aspect::{AspectRatio, InvalidAspectRatio};
pub use canvas::{CanvasSize, PixelSize};
pub use viewport::Viewport;
