use chrono::{DateTime, Utc};
use geo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use validator::{Validate, ValidationError};

/// Kind of place a location represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationCategory {
    Restaurant,
    Park,
    Transit,
    Shopping,
    Entertainment,
    Healthcare,
    Education,
    Government,
    Other,
}

impl LocationCategory {
    pub const ALL: [LocationCategory; 9] = [
        LocationCategory::Restaurant,
        LocationCategory::Park,
        LocationCategory::Transit,
        LocationCategory::Shopping,
        LocationCategory::Entertainment,
        LocationCategory::Healthcare,
        LocationCategory::Education,
        LocationCategory::Government,
        LocationCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationCategory::Restaurant => "restaurant",
            LocationCategory::Park => "park",
            LocationCategory::Transit => "transit",
            LocationCategory::Shopping => "shopping",
            LocationCategory::Entertainment => "entertainment",
            LocationCategory::Healthcare => "healthcare",
            LocationCategory::Education => "education",
            LocationCategory::Government => "government",
            LocationCategory::Other => "other",
        }
    }
}

/// Closed set of accessibility attributes a location can carry
///
/// Only the first nine variants have a catalog entry; the rest are reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessibilityFeatureName {
    WheelchairAccessible,
    AccessibleParking,
    AccessibleRestroom,
    BrailleSignage,
    Elevator,
    Ramp,
    WideDoorways,
    HearingLoop,
    ServiceAnimalsWelcome,
    AudioAssistance,
    Handrails,
    LowCounter,
    QuietArea,
    StaffTrainedInAccessibility,
    Other,
}

/// Symbolic icon resolved by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IconTag {
    Wheelchair,
    ParkingSquare,
    Bath,
    Braille,
    Elevator,
    MoveUp,
    Door,
    Ear,
    Dog,
}

/// Reference data describing one accessibility attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessibilityFeature {
    pub id: String,
    pub name: AccessibilityFeatureName,
    pub description: String,
    pub icon: IconTag,
}

/// A physical place annotated with accessibility attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub category: LocationCategory,
    #[serde(rename = "accessibilityFeatures", default)]
    pub accessibility_features: Vec<AccessibilityFeature>,
    #[serde(default)]
    pub ratings: f64,
    #[serde(rename = "reviewCount", default)]
    pub review_count: u32,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(rename = "addedBy")]
    pub added_by: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Location {
    /// Position as a geo point (x = longitude, y = latitude)
    #[inline]
    pub fn point(&self) -> Point<f64> {
        Point::new(self.lng, self.lat)
    }

    #[inline]
    pub fn has_feature(&self, name: AccessibilityFeatureName) -> bool {
        self.accessibility_features.iter().any(|f| f.name == name)
    }
}

/// A user's review of a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    #[serde(rename = "locationId")]
    pub location_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub username: String,
    pub rating: u8,
    pub comment: String,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Map filter criteria, combined with logical AND
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Filters {
    #[serde(default)]
    pub categories: HashSet<LocationCategory>,
    #[serde(rename = "accessibilityFeatures", default)]
    pub accessibility_features: HashSet<AccessibilityFeatureName>,
    #[validate(range(min = 0.0, max = 5.0), custom(function = "validate_finite"))]
    #[serde(rename = "minRating", default)]
    pub min_rating: f64,
    #[validate(range(exclusive_min = 0.0), custom(function = "validate_finite"))]
    #[serde(rename = "maxDistance", default = "default_max_distance")]
    pub max_distance: f64,
}

pub const DEFAULT_MAX_DISTANCE_KM: f64 = 10.0;

// Range checks compare with NaN as false, so they let it through
fn validate_finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("finite"))
    }
}

fn default_max_distance() -> f64 {
    DEFAULT_MAX_DISTANCE_KM
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            categories: HashSet::new(),
            accessibility_features: HashSet::new(),
            min_rating: 0.0,
            max_distance: DEFAULT_MAX_DISTANCE_KM,
        }
    }
}

/// Geospatial bounding box in degrees
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

/// Drop features whose id was already seen, keeping the first occurrence
pub fn dedup_features(features: Vec<AccessibilityFeature>) -> Vec<AccessibilityFeature> {
    let mut seen = HashSet::new();
    features
        .into_iter()
        .filter(|feature| seen.insert(feature.id.clone()))
        .collect()
}
