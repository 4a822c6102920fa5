// src/config.rs
//! TOML configuration with env-var override:
//! 1) $NEWSMAP_CONFIG_PATH
//! 2) config/newsmap.toml
//! 3) built-in defaults

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::aggregate::UnknownStatusPolicy;

const ENV_PATH: &str = "NEWSMAP_CONFIG_PATH";
const DEFAULT_PATH: &str = "config/newsmap.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewsmapConfig {
    /// Base URL of the per-date feed documents (`<base>/<YYYY-MM-DD>.json`).
    pub feed_base_url: String,
    /// Text document whose second line carries `# Generated on <timestamp>`.
    /// Empty disables the last-update lookup.
    pub metadata_url: String,
    /// How many calendar days of feeds to load, ending today.
    pub days: u32,
    /// Routing for items whose status is neither recognized state.
    pub unknown_status_policy: UnknownStatusPolicy,
}

impl Default for NewsmapConfig {
    fn default() -> Self {
        Self {
            feed_base_url: "http://127.0.0.1:8080/news".to_string(),
            metadata_url: "http://127.0.0.1:8080/.well-known/security.txt".to_string(),
            days: 7,
            unknown_status_policy: UnknownStatusPolicy::Drop,
        }
    }
}

impl NewsmapConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s).context("parsing newsmap config TOML")?;
        if cfg.days == 0 {
            return Err(anyhow!("days must be at least 1"));
        }
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Resolve configuration from env var, default path, or defaults.
    pub fn load() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::from_path(&pb);
            }
            return Err(anyhow!("{ENV_PATH} points to non-existent path"));
        }
        let default = PathBuf::from(DEFAULT_PATH);
        if default.exists() {
            return Self::from_path(&default);
        }
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg = NewsmapConfig::from_toml_str(
            r#"
            feed_base_url = "https://example.test/news"
            unknown_status_policy = "route_to_other"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.feed_base_url, "https://example.test/news");
        assert_eq!(cfg.days, 7);
        assert_eq!(cfg.unknown_status_policy, UnknownStatusPolicy::RouteToOther);
    }

    #[test]
    fn zero_day_window_is_rejected() {
        assert!(NewsmapConfig::from_toml_str("days = 0").is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(NewsmapConfig::from_toml_str("feedbase = \"x\"").is_err());
    }
}
