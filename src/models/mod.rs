// Model exports
pub mod catalog;
pub mod domain;
pub mod events;
pub mod requests;

pub use catalog::{feature_catalog, CATALOG_FEATURES};
pub use domain::{
    dedup_features, AccessibilityFeature, AccessibilityFeatureName, BoundingBox, Filters, IconTag,
    Location, LocationCategory, Review, DEFAULT_MAX_DISTANCE_KM,
};
pub use events::StoreEvent;
pub use requests::{FiltersPatch, LocationInput, LocationPatch, ReviewInput};
