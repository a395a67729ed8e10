use anyhow::{Context, Result};
use winit::dpi::LogicalSize;

use lumen_engine::logging::LoggingConfig;
use lumen_engine::window::RuntimeConfig;

/// Studio settings.
///
/// Defaults can be overridden from the environment:
/// - `LUMEN_MAXIMUM_DPR`: positive number, or `none` for no clamp
/// - `LUMEN_LOG`: `env_logger` filter
#[derive(Debug, Clone, PartialEq)]
pub struct StudioConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub maximum_dpr: Option<f64>,
    pub log_filter: Option<String>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            title: "lumen studio".to_string(),
            width: 1280.0,
            height: 720.0,
            maximum_dpr: Some(2.0),
            log_filter: None,
        }
    }
}

impl StudioConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from defaults plus whatever `lookup` returns.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup("LUMEN_MAXIMUM_DPR") {
            config.maximum_dpr = parse_maximum_dpr(&raw).context("invalid LUMEN_MAXIMUM_DPR")?;
        }
        if let Some(filter) = lookup("LUMEN_LOG") {
            config.log_filter = Some(filter);
        }

        Ok(config)
    }

    pub fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
        }
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.log_filter.clone(),
            ..LoggingConfig::default()
        }
    }
}

fn parse_maximum_dpr(raw: &str) -> Result<Option<f64>> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("none") {
        return Ok(None);
    }

    let value: f64 = raw.parse().with_context(|| format!("{raw:?} is not a number"))?;
    anyhow::ensure!(value.is_finite() && value > 0.0, "{value} is not a positive ratio");
    Ok(Some(value))
}
