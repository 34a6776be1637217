//! AccessMap - accessibility location directory
//!
//! In-memory store of locations annotated with accessibility features, with
//! incremental review aggregation and a composable map filter engine.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{distance_km, FilterEngine, LocationStore, MapView, SharedLocationStore, StoreError};
pub use models::{
    AccessibilityFeature, AccessibilityFeatureName, Filters, FiltersPatch, Location,
    LocationCategory, LocationInput, LocationPatch, Review, ReviewInput, StoreEvent,
};
pub use services::{SeedError, SeedSource};
