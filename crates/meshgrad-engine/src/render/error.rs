use std::fmt;

/// Failure of a render, readback or renderer setup.
///
/// Every variant is fatal to the attempt that produced it; nothing is retried.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// No adapter/device could be obtained, the device was lost, or the
    /// renderer was already destroyed.
    ContextUnavailable(String),
    /// WGSL front-end diagnostic.
    ShaderCompileFailed(String),
    /// Module validation diagnostic (entry points, bindings, interfaces).
    ProgramLinkFailed(String),
    /// Zero, negative or non-finite canvas size.
    InvalidDimensions { width: f32, height: f32 },
    /// Draw or export attempted with no anchors.
    EmptyAnchorSet,
    /// Mapping the readback buffer failed.
    Readback(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContextUnavailable(why) => write!(f, "GPU context unavailable: {why}"),
            Self::ShaderCompileFailed(diag) => write!(f, "shader compile failed:\n{diag}"),
            Self::ProgramLinkFailed(diag) => write!(f, "shader program link failed:\n{diag}"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid canvas dimensions {width}x{height}")
            }
            Self::EmptyAnchorSet => write!(f, "no anchor points to render"),
            Self::Readback(why) => write!(f, "pixel readback failed: {why}"),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<meshgrad_gen::InvalidDimensions> for RenderError {
    fn from(e: meshgrad_gen::InvalidDimensions) -> Self {
        Self::InvalidDimensions { width: e.width, height: e.height }
    }
}
