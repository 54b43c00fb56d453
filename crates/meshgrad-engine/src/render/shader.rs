//! WGSL compile + validate step.
//!
//! wgpu reports shader errors through the device's uncaptured-error handler,
//! which panics by default. Running naga first turns them into
//! [`RenderError`] values carrying the full diagnostic text.

use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::RenderError;

pub(crate) const GRADIENT_WGSL: &str = include_str!("shaders/gradient.wgsl");

/// Parses (`ShaderCompileFailed`) then validates (`ProgramLinkFailed`) `source`.
pub(crate) fn check_wgsl(label: &str, source: &str) -> Result<(), RenderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|err| {
        let diag = err.emit_to_string(source);
        log::error!("{label}: WGSL parse error\n{diag}");
        RenderError::ShaderCompileFailed(diag)
    })?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|err| {
            let diag = err.emit_to_string(source);
            log::error!("{label}: WGSL validation error\n{diag}");
            RenderError::ProgramLinkFailed(diag)
        })?;

    log::debug!("{label}: WGSL ok");
    Ok(())
}
