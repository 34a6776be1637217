use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::config::StoreSettings;
use crate::models::Location;

/// Builtin Hyderabad collection shipped with the crate
const BUILTIN_SEED: &str = include_str!("../../data/hyderabad.json");

/// Errors that can occur while loading the initial collection
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid seed data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the initial location collection comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    Builtin,
    JsonFile(PathBuf),
}

impl SeedSource {
    pub fn from_settings(settings: &StoreSettings) -> Self {
        match &settings.seed_path {
            Some(path) => SeedSource::JsonFile(PathBuf::from(path)),
            None => SeedSource::Builtin,
        }
    }

    /// Load the collection after waiting `delay`
    ///
    /// The delay stands in for a remote fetch. There is no cancellation:
    /// the future either resolves with the whole collection or fails.
    pub async fn load(&self, delay: Duration) -> Result<Vec<Location>, SeedError> {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let locations: Vec<Location> = match self {
            SeedSource::Builtin => builtin_locations()?,
            SeedSource::JsonFile(path) => {
                let raw = tokio::fs::read_to_string(path).await?;
                serde_json::from_str(&raw)?
            }
        };

        tracing::info!("Loaded {} locations from {:?}", locations.len(), self);
        Ok(locations)
    }
}

/// The builtin collection, parsed without delay
pub fn builtin_locations() -> Result<Vec<Location>, SeedError> {
    Ok(serde_json::from_str(BUILTIN_SEED)?)
}
