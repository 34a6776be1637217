use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use validator::{Validate, ValidationError};

use crate::models::domain::{
    dedup_features, AccessibilityFeature, AccessibilityFeatureName, Filters, Location,
    LocationCategory,
};

/// Input for creating a location
///
/// The store assigns `id`, `ratings`, `reviewCount` and both timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LocationInput {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1))]
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    #[validate(required)]
    pub category: Option<LocationCategory>,
    #[serde(rename = "accessibilityFeatures", default)]
    pub accessibility_features: Vec<AccessibilityFeature>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(rename = "addedBy", default)]
    pub added_by: String,
}

/// Partial update for an existing location
///
/// Derived fields (`ratings`, `reviewCount`) and identity/timestamps are not
/// part of the patch; payloads that carry them are rejected on deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LocationPatch {
    #[validate(length(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(length(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<LocationCategory>,
    #[serde(
        rename = "accessibilityFeatures",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub accessibility_features: Option<Vec<AccessibilityFeature>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
}

impl LocationPatch {
    /// Merge supplied fields into `location`; timestamps are left to the caller
    pub fn apply_to(self, location: &mut Location) {
        if let Some(name) = self.name {
            location.name = name;
        }
        if let Some(description) = self.description {
            location.description = description;
        }
        if let Some(address) = self.address {
            location.address = address;
        }
        if let Some(lat) = self.lat {
            location.lat = lat;
        }
        if let Some(lng) = self.lng {
            location.lng = lng;
        }
        if let Some(category) = self.category {
            location.category = category;
        }
        if let Some(features) = self.accessibility_features {
            location.accessibility_features = dedup_features(features);
        }
        if let Some(photos) = self.photos {
            location.photos = photos;
        }
    }
}

/// Input for attaching a review to a location
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviewInput {
    #[validate(length(min = 1))]
    #[serde(rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    #[validate(custom(function = "validate_comment"))]
    pub comment: String,
    #[serde(default)]
    pub photos: Vec<String>,
}

pub const MIN_COMMENT_CHARS: usize = 10;

/// Comments are measured after trimming surrounding whitespace
fn validate_comment(comment: &str) -> Result<(), ValidationError> {
    if comment.trim().chars().count() < MIN_COMMENT_CHARS {
        return Err(ValidationError::new("length"));
    }
    Ok(())
}

/// Partial update for the current map filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FiltersPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<HashSet<LocationCategory>>,
    #[serde(
        rename = "accessibilityFeatures",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub accessibility_features: Option<HashSet<AccessibilityFeatureName>>,
    #[serde(rename = "minRating", default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(rename = "maxDistance", default, skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<f64>,
}

impl Filters {
    /// Copy of these filters with the patch's fields laid over them
    pub fn merged(&self, patch: FiltersPatch) -> Filters {
        Filters {
            categories: patch.categories.unwrap_or_else(|| self.categories.clone()),
            accessibility_features: patch
                .accessibility_features
                .unwrap_or_else(|| self.accessibility_features.clone()),
            min_rating: patch.min_rating.unwrap_or(self.min_rating),
            max_distance: patch.max_distance.unwrap_or(self.max_distance),
        }
    }
}
