use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use crate::core::DEFAULT_EVENT_CAPACITY;
use crate::models::{Filters, DEFAULT_MAX_DISTANCE_KM};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub store: StoreSettings,
    pub filters: FilterSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// JSON file with the initial collection; the builtin one when unset
    pub seed_path: Option<String>,
    pub load_delay_ms: u64,
    pub event_capacity: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            seed_path: None,
            load_delay_ms: default_load_delay_ms(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl StoreSettings {
    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }
}

fn default_load_delay_ms() -> u64 { 500 }

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    pub max_distance_km: f64,
    pub min_rating: f64,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            min_rating: 0.0,
        }
    }
}

impl FilterSettings {
    /// Default filters the map starts from and resets to
    pub fn to_filters(&self) -> Filters {
        Filters {
            categories: HashSet::new(),
            accessibility_features: HashSet::new(),
            min_rating: self.min_rating,
            max_distance: self.max_distance_km,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with ACCESS_MAP__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., ACCESS_MAP__STORE__SEED_PATH -> store.seed_path
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("ACCESS_MAP")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
