use std::sync::Once;

/// Filter used when neither the config nor `RUST_LOG` names one.
///
/// wgpu's internals are noisy at `info` once a frame loop is running.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter directives, e.g. `"lumen_engine=debug"`.
    /// Takes precedence over `RUST_LOG`.
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,

    /// Millisecond timestamps, useful when reading frame timing from logs.
    pub timestamp_millis: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            timestamp_millis: true,
        }
    }
}

/// Picks the filter directives: explicit config, then `RUST_LOG`, then
/// [`DEFAULT_FILTER`]. Blank values count as unset.
fn resolve_filter(explicit: Option<String>, rust_log: Option<String>) -> String {
    explicit
        .into_iter()
        .chain(rust_log)
        .find(|filter| !filter.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

static INIT: Once = Once::new();

/// Installs the `env_logger` backend. Only the first call has an effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = resolve_filter(config.env_filter, std::env::var("RUST_LOG").ok());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter).write_style(config.write_style);
        if config.timestamp_millis {
            builder.format_timestamp_millis();
        }

        // A host binary may have installed its own logger already.
        if builder.try_init().is_ok() {
            log::debug!("logging initialized with {filter:?}");
        }
    });
}
