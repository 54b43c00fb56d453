//! Meshgrad engine crate.
//!
//! Renders inverse-distance-weighted mesh gradients with wgpu and exports
//! them as PNG. Point and palette generation live in `meshgrad-gen`.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`device`] | headless `Gpu` (adapter / device / queue) |
//! | [`render`] | `GradientRenderer`, `RenderCtx`, `RenderError` |
//! | [`export`] | row flip + PNG encoding |
//! | [`session`] | `MeshGradient`: points, canvas sizes, debounced updates |
//! | [`time`] | `Debouncer` |
//! | [`coords`] | `Viewport`, `PixelSize`, `CanvasSize`, `AspectRatio` |
//! | [`logging`] | `init_logging` |

pub mod coords;
pub mod device;
pub mod export;
pub mod logging;
pub mod render;
pub mod session;
pub mod time;

pub use meshgrad_gen as generate;
