use serde::Deserialize;
use std::path::Path;

use crate::core::errors::{CdnwatchError, Result};

/// File name of the optional configuration inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration read from `<data dir>/config.toml`.
///
/// Every field has a default, so a missing file or a missing section is
/// equivalent to an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiSection,
}

impl AppConfig {
    /// Load the configuration, falling back to defaults when the file is absent.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content).map_err(|e| CdnwatchError::InvalidConfig {
            detail: format!("Failed to parse {}: {e}", config_path.display()),
        })?;
        config.api.validate()?;

        tracing::debug!(path = %config_path.display(), "loaded configuration");
        Ok(config)
    }
}

/// The `[api]` section: where and what to query.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    pub base_url: String,
    pub service: String,
    pub granularity: String,
    pub metrics: String,
    /// Reported as the monthly limit of every account. The statistics API
    /// does not expose a quota, so this is a placeholder.
    pub traffic_limit_gb: f64,
    /// Per-request timeout. Absent means requests may wait indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: "https://api.gcore.com".into(),
            service: "CDN".into(),
            granularity: "1d".into(),
            metrics: "total_bytes".into(),
            traffic_limit_gb: 1000.0,
            timeout_secs: None,
        }
    }
}

impl ApiSection {
    fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(CdnwatchError::InvalidConfig {
                detail: format!("api.base_url must be an http(s) URL, got '{}'", self.base_url),
            });
        }
        if !self.traffic_limit_gb.is_finite() || self.traffic_limit_gb < 0.0 {
            return Err(CdnwatchError::InvalidConfig {
                detail: "api.traffic_limit_gb must be a non-negative number".into(),
            });
        }
        Ok(())
    }
}
