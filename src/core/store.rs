use chrono::Utc;
use geo::Point;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, trace, warn};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::core::distance::{calculate_bounding_box, distance_km, is_within_bounding_box};
use crate::core::rating;
use crate::models::{
    dedup_features, AccessibilityFeatureName, Location, LocationInput, LocationPatch, Review,
    ReviewInput, StoreEvent,
};

/// Errors returned by store mutations
///
/// A failed operation never leaves a partial change behind.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Location not found: {0}")]
    NotFound(String),
}

/// Default buffer size of the change notification channel
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Store handle for multi-threaded callers; the mutex serialises every mutation
pub type SharedLocationStore = Arc<Mutex<LocationStore>>;

/// Single source of truth for locations
///
/// Keeps insertion order for queries and an id index for lookups. Mutations
/// take `&mut self` and run to completion, so each one is all-or-nothing.
/// Readers that query the store always see current data; subscribers get a
/// [`StoreEvent`] after every committed mutation and may miss events if they
/// fall behind the channel buffer.
#[derive(Debug)]
pub struct LocationStore {
    locations: Vec<Location>,
    index: HashMap<String, usize>,
    events: broadcast::Sender<StoreEvent>,
}

impl LocationStore {
    pub fn new() -> Self {
        Self::with_locations(Vec::new(), DEFAULT_EVENT_CAPACITY)
    }

    /// Build a store from an initial collection
    ///
    /// Records whose id was already seen are skipped, as are records whose
    /// rating is outside 0..=5 or that carry a rating without any reviews.
    pub fn with_locations(locations: Vec<Location>, event_capacity: usize) -> Self {
        let (events, _) = broadcast::channel(event_capacity.max(1));
        let mut store = Self {
            locations: Vec::with_capacity(locations.len()),
            index: HashMap::with_capacity(locations.len()),
            events,
        };

        for mut location in locations {
            if store.index.contains_key(&location.id) {
                warn!("Skipping duplicate location id in initial collection: {}", location.id);
                continue;
            }
            if !has_consistent_rating(&location) {
                warn!(
                    "Skipping location {} with inconsistent rating {} over {} reviews",
                    location.id, location.ratings, location.review_count
                );
                continue;
            }
            location.accessibility_features = dedup_features(location.accessibility_features);
            store.insert(location);
        }

        info!("Location store initialised with {} locations", store.len());
        store
    }

    pub fn into_shared(self) -> SharedLocationStore {
        Arc::new(Mutex::new(self))
    }

    /// Subscribe to change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// All locations in insertion order
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn snapshot(&self) -> Vec<Location> {
        self.locations.clone()
    }

    /// Create a location with a fresh id, zeroed rating and current timestamps
    pub fn create(&mut self, input: LocationInput) -> Result<Location, StoreError> {
        if let Err(errors) = input.validate() {
            warn!("Rejected location input: {}", errors);
            return Err(errors.into());
        }
        let Some(category) = input.category else {
            return Err(missing_field("category").into());
        };

        let now = Utc::now();
        let location = Location {
            id: format!("loc-{}", Uuid::new_v4()),
            name: input.name,
            description: input.description,
            address: input.address,
            lat: input.lat,
            lng: input.lng,
            category,
            accessibility_features: dedup_features(input.accessibility_features),
            ratings: 0.0,
            review_count: 0,
            photos: input.photos,
            added_by: input.added_by,
            created_at: now,
            updated_at: now,
        };

        self.insert(location.clone());
        info!("Created location {} ({})", location.id, location.name);

        self.publish(StoreEvent::LocationCreated {
            location: location.clone(),
        });
        Ok(location)
    }

    /// Merge a patch into an existing location and refresh `updated_at`
    ///
    /// `ratings` and `review_count` cannot be changed here; they only move
    /// through [`LocationStore::attach_review`].
    pub fn update(&mut self, id: &str, patch: LocationPatch) -> Result<Location, StoreError> {
        let position = self.position(id)?;
        if let Err(errors) = patch.validate() {
            warn!("Rejected update for location {}: {}", id, errors);
            return Err(errors.into());
        }

        let location = self
            .locations
            .get_mut(position)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        patch.apply_to(location);
        location.updated_at = Utc::now();
        let updated = location.clone();

        info!("Updated location {}", updated.id);
        self.publish(StoreEvent::LocationUpdated {
            location: updated.clone(),
        });
        Ok(updated)
    }

    /// Fold a review into the location's running mean rating
    pub fn attach_review(
        &mut self,
        location_id: &str,
        input: ReviewInput,
    ) -> Result<Location, StoreError> {
        let position = self.position(location_id)?;
        if let Err(errors) = input.validate() {
            warn!("Rejected review for location {}: {}", location_id, errors);
            return Err(errors.into());
        }

        let now = Utc::now();
        let location = self
            .locations
            .get_mut(position)
            .ok_or_else(|| StoreError::NotFound(location_id.to_string()))?;
        location.ratings = rating::combine(location.ratings, location.review_count, input.rating);
        location.review_count = location.review_count.saturating_add(1);
        location.updated_at = now;
        let updated = location.clone();

        let review = Review {
            id: format!("rev-{}", Uuid::new_v4()),
            location_id: updated.id.clone(),
            user_id: input.user_id,
            username: input.username,
            rating: input.rating,
            comment: input.comment,
            photos: input.photos,
            created_at: now,
            updated_at: now,
        };

        info!(
            "Attached review {} to location {}: rating {} ({}), mean {} over {} reviews",
            review.id,
            updated.id,
            review.rating,
            rating::rating_label(review.rating).unwrap_or("unrated"),
            updated.ratings,
            updated.review_count
        );
        self.publish(StoreEvent::ReviewAttached {
            review,
            location: updated.clone(),
        });
        Ok(updated)
    }

    /// Look up a location; absence is not an error
    pub fn get_by_id(&self, id: &str) -> Option<&Location> {
        self.index.get(id).and_then(|&position| self.locations.get(position))
    }

    /// All locations carrying the named feature
    pub fn query_by_feature(&self, name: AccessibilityFeatureName) -> Vec<Location> {
        let matches: Vec<Location> = self
            .locations
            .iter()
            .filter(|location| location.has_feature(name))
            .cloned()
            .collect();

        debug!("Found {} locations with feature {:?}", matches.len(), name);
        matches
    }

    /// All locations within `radius_km` of `origin` under the planar distance
    pub fn query_near(&self, origin: Point<f64>, radius_km: f64) -> Vec<Location> {
        // Box prefilter is exact for the planar metric, so it never drops a match
        let bbox = calculate_bounding_box(origin, radius_km);

        let matches: Vec<Location> = self
            .locations
            .iter()
            .filter(|location| is_within_bounding_box(location.point(), &bbox))
            .filter(|location| distance_km(location.point(), origin) <= radius_km)
            .cloned()
            .collect();

        debug!(
            "Found {} locations within {}km of ({}, {})",
            matches.len(),
            radius_km,
            origin.y(),
            origin.x()
        );
        matches
    }

    /// The `limit` highest-rated locations; ties keep insertion order
    pub fn featured(&self, limit: usize) -> Vec<Location> {
        let mut ranked = self.locations.clone();
        ranked.sort_by(|a, b| {
            b.ratings
                .partial_cmp(&a.ratings)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(limit);
        ranked
    }

    fn position(&self, id: &str) -> Result<usize, StoreError> {
        match self.index.get(id) {
            Some(&position) => Ok(position),
            None => {
                warn!("Location not found: {}", id);
                Err(StoreError::NotFound(id.to_string()))
            }
        }
    }

    fn insert(&mut self, location: Location) {
        self.index.insert(location.id.clone(), self.locations.len());
        self.locations.push(location);
    }

    fn publish(&self, event: StoreEvent) {
        if self.events.send(event).is_err() {
            trace!("No subscribers for store event");
        }
    }
}

impl Default for LocationStore {
    fn default() -> Self {
        Self::new()
    }
}

fn missing_field(field: &'static str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, ValidationError::new("required"));
    errors
}

/// Mean in 0..=5, and exactly 0 while there are no reviews
fn has_consistent_rating(location: &Location) -> bool {
    (0.0..=5.0).contains(&location.ratings)
        && (location.review_count > 0 || location.ratings == 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LocationCategory;

    fn create_input(name: &str) -> LocationInput {
        LocationInput {
            name: name.to_string(),
            description: "Step-free entrance".to_string(),
            address: "Tank Bund Rd, Hyderabad".to_string(),
            lat: 17.4239,
            lng: 78.4738,
            category: Some(LocationCategory::Park),
            accessibility_features: vec![],
            photos: vec![],
            added_by: "user1".to_string(),
        }
    }

    fn create_review(rating: u8) -> ReviewInput {
        ReviewInput {
            user_id: "user2".to_string(),
            username: "ravi".to_string(),
            rating,
            comment: "Ramps at every entrance".to_string(),
            photos: vec![],
        }
    }

    #[test]
    fn test_create_assigns_derived_fields() {
        let mut store = LocationStore::new();
        let location = store.create(create_input("Lumbini Park")).unwrap();

        assert!(location.id.starts_with("loc-"));
        assert_eq!(location.ratings, 0.0);
        assert_eq!(location.review_count, 0);
        assert_eq!(location.created_at, location.updated_at);
        assert_eq!(store.get_by_id(&location.id), Some(&location));
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let mut store = LocationStore::new();
        let result = store.create(create_input(""));

        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_rejects_missing_category() {
        let mut store = LocationStore::new();
        let mut input = create_input("Lumbini Park");
        input.category = None;

        assert!(matches!(store.create(input), Err(StoreError::Validation(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_attach_review_updates_mean() {
        let mut store = LocationStore::new();
        let id = store.create(create_input("Lumbini Park")).unwrap().id;

        store.attach_review(&id, create_review(5)).unwrap();
        let location = store.attach_review(&id, create_review(3)).unwrap();

        assert_eq!(location.ratings, 4.0);
        assert_eq!(location.review_count, 2);
        assert!(location.updated_at >= location.created_at);
    }

    #[test]
    fn test_invalid_review_leaves_location_unchanged() {
        let mut store = LocationStore::new();
        let id = store.create(create_input("Lumbini Park")).unwrap().id;
        let before = store.get_by_id(&id).cloned();

        let mut review = create_review(4);
        review.comment = "meh".to_string();
        assert!(matches!(store.attach_review(&id, review), Err(StoreError::Validation(_))));
        assert!(matches!(
            store.attach_review(&id, create_review(0)),
            Err(StoreError::Validation(_))
        ));

        assert_eq!(store.get_by_id(&id).cloned(), before);
    }

    #[test]
    fn test_whitespace_padded_comment_is_rejected() {
        let mut store = LocationStore::new();
        let id = store.create(create_input("Necklace Road")).unwrap().id;
        let mut events = store.subscribe();

        let mut review = create_review(5);
        review.comment = "   ok     ".to_string();
        assert!(matches!(store.attach_review(&id, review), Err(StoreError::Validation(_))));

        let location = store.get_by_id(&id).unwrap();
        assert_eq!((location.ratings, location.review_count), (0.0, 0));
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_review_for_missing_location() {
        let mut store = LocationStore::new();
        let result = store.attach_review("loc-missing", create_review(4));
        assert!(matches!(result, Err(StoreError::NotFound(id)) if id == "loc-missing"));
    }

    #[test]
    fn test_update_merges_fields() {
        let mut store = LocationStore::new();
        let created = store.create(create_input("Lumbini Park")).unwrap();

        let updated = store
            .update(
                &created.id,
                LocationPatch {
                    name: Some("Lumbini Park East Gate".to_string()),
                    photos: Some(vec!["https://example.com/gate.jpg".to_string()]),
                    ..LocationPatch::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Lumbini Park East Gate");
        assert_eq!(updated.address, created.address);
        assert_eq!(updated.photos.len(), 1);
        assert_eq!(updated.ratings, 0.0);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[test]
    fn test_update_missing_location() {
        let mut store = LocationStore::new();
        store.create(create_input("Lumbini Park")).unwrap();
        let before = store.snapshot();

        let result = store.update("loc-missing", LocationPatch::default());

        assert!(matches!(result, Err(StoreError::NotFound(_))));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_events_published_after_mutations() {
        let mut store = LocationStore::new();
        let mut events = store.subscribe();

        let id = store.create(create_input("Lumbini Park")).unwrap().id;
        store.attach_review(&id, create_review(4)).unwrap();

        match events.try_recv().unwrap() {
            StoreEvent::LocationCreated { location } => assert_eq!(location.id, id),
            other => panic!("unexpected event: {:?}", other),
        }
        match events.try_recv().unwrap() {
            StoreEvent::ReviewAttached { review, location } => {
                assert_eq!(review.location_id, id);
                assert!(review.id.starts_with("rev-"));
                assert_eq!(location.review_count, 1);
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_failed_mutation_publishes_nothing() {
        let mut store = LocationStore::new();
        let mut events = store.subscribe();

        let _ = store.update("loc-missing", LocationPatch::default());
        let _ = store.create(create_input(""));

        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_duplicate_seed_ids_are_skipped() {
        let mut store = LocationStore::new();
        let location = store.create(create_input("Lumbini Park")).unwrap();

        let seeded = LocationStore::with_locations(vec![location.clone(), location], 8);
        assert_eq!(seeded.len(), 1);
    }

    #[test]
    fn test_seed_records_with_bad_ratings_are_skipped() {
        let mut store = LocationStore::new();
        let valid = store.create(create_input("Lumbini Park")).unwrap();

        let with_rating = |id: &str, ratings: f64, review_count: u32| Location {
            id: id.to_string(),
            ratings,
            review_count,
            ..valid.clone()
        };

        let seeded = LocationStore::with_locations(
            vec![
                with_rating("too-high", 9.9, 3),
                with_rating("negative", -1.0, 3),
                with_rating("not-a-number", f64::NAN, 3),
                with_rating("no-reviews", 4.0, 0),
                with_rating("reviewed", 4.2, 5),
                valid.clone(),
            ],
            8,
        );

        assert_eq!(seeded.len(), 2);
        assert!(seeded.get_by_id("too-high").is_none());
        assert!(seeded.get_by_id("not-a-number").is_none());
        assert!(seeded.get_by_id("no-reviews").is_none());
        assert_eq!(seeded.get_by_id("reviewed").map(|l| l.ratings), Some(4.2));
        assert!(seeded.get_by_id(&valid.id).is_some());
    }
}
