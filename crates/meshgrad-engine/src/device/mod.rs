//! GPU device management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue without a window
//! - tracking device loss so renderers fail instead of drawing into the void

mod gpu;

pub use gpu::{Gpu, GpuInit};
