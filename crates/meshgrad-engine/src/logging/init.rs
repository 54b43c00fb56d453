use std::sync::OnceLock;

/// Filter used when neither [`LoggingConfig::env_filter`] nor `RUST_LOG` is
/// set. wgpu's internals log every resource creation at info.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "warn",
/// "meshgrad_engine=debug,wgpu_core=warn") and wins over `RUST_LOG`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Write through the test harness so output is captured per test.
    pub is_test: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            is_test: false,
        }
    }
}

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Installs `env_logger` as the global logger, once per process.
///
/// Returns `true` if this crate's logger is the one installed. Later calls,
/// or a logger installed by the host first, leave things as they are.
pub fn init_logging(config: LoggingConfig) -> bool {
    *INSTALLED.get_or_init(|| {
        let filter = resolve_filter(config.env_filter, std::env::var("RUST_LOG").ok());

        let mut builder = env_logger::Builder::new();
        builder
            .parse_filters(&filter)
            .write_style(config.write_style)
            .is_test(config.is_test);

        match builder.try_init() {
            Ok(()) => {
                log::debug!("logging initialized ({filter})");
                true
            }
            Err(_) => {
                log::debug!("a logger is already installed; keeping it");
                false
            }
        }
    })
}

fn resolve_filter(explicit: Option<String>, env: Option<String>) -> String {
    explicit
        .or(env)
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_beats_env() {
        let f = resolve_filter(Some("warn".into()), Some("trace".into()));
        assert_eq!(f, "warn");
    }

    #[test]
    fn env_filter_beats_default() {
        assert_eq!(resolve_filter(None, Some("debug".into())), "debug");
    }

    #[test]
    fn blank_filter_falls_back_to_default() {
        assert_eq!(resolve_filter(None, Some("  ".into())), DEFAULT_FILTER);
        assert_eq!(resolve_filter(None, None), DEFAULT_FILTER);
    }
}
