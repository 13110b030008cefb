use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::TimeDelta;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Display name of the session user.
    pub user_name: String,
    pub seed_sample_orders: bool,
    /// Bound of the order actor's request queue.
    pub channel_capacity: usize,
    /// Pending orders older than this are cancelled by the sweeper. Zero disables it.
    pub stale_order_minutes: u64,
    pub sweep_interval_secs: u64,
    /// Default tracing filter; `RUST_LOG` wins when set.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_name: "Guest".into(),
            seed_sample_orders: true,
            channel_capacity: 32,
            stale_order_minutes: 30,
            sweep_interval_secs: 60,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    /// Defaults, then the TOML file at `path` (if given), then `COURIER_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(v) = lookup("COURIER_USER_NAME") {
            self.user_name = v;
        }
        if let Some(v) = lookup("COURIER_SEED_SAMPLE_ORDERS") {
            self.seed_sample_orders = parse("COURIER_SEED_SAMPLE_ORDERS", v)?;
        }
        if let Some(v) = lookup("COURIER_CHANNEL_CAPACITY") {
            self.channel_capacity = parse("COURIER_CHANNEL_CAPACITY", v)?;
        }
        if let Some(v) = lookup("COURIER_STALE_ORDER_MINUTES") {
            self.stale_order_minutes = parse("COURIER_STALE_ORDER_MINUTES", v)?;
        }
        if let Some(v) = lookup("COURIER_SWEEP_INTERVAL_SECS") {
            self.sweep_interval_secs = parse("COURIER_SWEEP_INTERVAL_SECS", v)?;
        }
        if let Some(v) = lookup("COURIER_LOG") {
            self.log_filter = v;
        }
        Ok(())
    }

    /// `None` when stale-order expiry is disabled.
    pub fn stale_order_max_age(&self) -> Option<TimeDelta> {
        match self.stale_order_minutes {
            0 => None,
            minutes => TimeDelta::try_minutes(i64::try_from(minutes).ok()?),
        }
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}
