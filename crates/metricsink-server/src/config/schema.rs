use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;
use metricsink_core::error::{MetricError, Result};

/// Database file name inside `storage.dir`.
pub const DB_FILE_NAME: &str = "wa.sqlite";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub storage: StorageSection,

    #[serde(default)]
    pub log: LogSection,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            storage: StorageSection::default(),
            log: LogSection::default(),
        }
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.server.validate()?;
        self.storage.validate()?;
        self.log.validate()?;

        Ok(())
    }

    /// Apply the process environment on top of the file values.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// `LOGLEVEL`, `SQLITE_DB_PATH`, `METRICSINK_ENV=testing`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(level) = lookup("LOGLEVEL").filter(|v| !v.is_empty()) {
            self.log.level = level.to_lowercase();
        }
        if let Some(dir) = lookup("SQLITE_DB_PATH").filter(|v| !v.is_empty()) {
            self.storage.dir = dir;
        }
        if lookup("METRICSINK_ENV").as_deref() == Some("testing") {
            self.storage.mode = StorageMode::Testing;
        }
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.server.listen_addr()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .map_err(|e| MetricError::Config(format!("server.listen must be a valid SocketAddr: {e}")))
    }
}

fn default_listen() -> String {
    "0.0.0.0:5000".into()
}

/// Selects the table the store binds at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    #[default]
    Normal,
    Testing,
}

impl StorageMode {
    pub fn table_name(self) -> &'static str {
        match self {
            StorageMode::Normal => "metrics",
            StorageMode::Testing => "testing_table_metrics",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageSection {
    #[serde(default = "default_storage_dir")]
    pub dir: String,

    #[serde(default)]
    pub mode: StorageMode,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            mode: StorageMode::default(),
        }
    }
}

impl StorageSection {
    pub fn validate(&self) -> Result<()> {
        if self.dir.trim().is_empty() {
            return Err(MetricError::Config("storage.dir must not be empty".into()));
        }
        Ok(())
    }

    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(DB_FILE_NAME)
    }
}

fn default_storage_dir() -> String {
    "/data".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl LogSection {
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.level.as_str()) {
            return Err(MetricError::Config(format!(
                "log.level must be one of {}, got {:?}",
                LOG_LEVELS.join("/"),
                self.level
            )));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".into()
}
