//! Server config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use metricsink_core::error::{MetricError, Result};

pub use schema::{ServiceConfig, LogSection, ServerSection, StorageMode, StorageSection};

/// Env var naming the config file.
pub const CONFIG_PATH_ENV: &str = "METRICSINK_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "metricsink.yaml";

pub fn load_from_file(path: &str) -> Result<ServiceConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MetricError::Config(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServiceConfig> {
    let cfg: ServiceConfig = serde_yaml::from_str(s)
        .map_err(|e| MetricError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Startup config: the file if present (defaults otherwise), then env overrides.
pub fn load() -> Result<ServiceConfig> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let mut cfg = if Path::new(&path).exists() {
        load_from_file(&path)?
    } else {
        ServiceConfig::default()
    };
    cfg.apply_env();
    cfg.validate()?;
    Ok(cfg)
}
