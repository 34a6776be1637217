use geo::Point;

use crate::core::distance::distance_km;
use crate::models::{Filters, Location};

/// Passes when no categories are selected or the location's category is one of them
#[inline]
pub fn matches_category(location: &Location, filters: &Filters) -> bool {
    filters.categories.is_empty() || filters.categories.contains(&location.category)
}

/// Passes when the location has every selected feature (all-of, not any-of)
#[inline]
pub fn matches_features(location: &Location, filters: &Filters) -> bool {
    filters
        .accessibility_features
        .iter()
        .all(|name| location.has_feature(*name))
}

#[inline]
pub fn matches_rating(location: &Location, filters: &Filters) -> bool {
    location.ratings >= filters.min_rating
}

/// Passes when there is no origin, or the location is within `max_distance` of it
#[inline]
pub fn matches_distance(location: &Location, filters: &Filters, origin: Option<Point<f64>>) -> bool {
    match origin {
        Some(origin) => distance_km(location.point(), origin) <= filters.max_distance,
        None => true,
    }
}

/// Conjunction of all four predicates
#[inline]
pub fn matches_filters(location: &Location, filters: &Filters, origin: Option<Point<f64>>) -> bool {
    matches_category(location, filters)
        && matches_features(location, filters)
        && matches_rating(location, filters)
        && matches_distance(location, filters, origin)
}

/// Stateless filter over a location collection
///
/// Output keeps the relative order of the input; nothing is sorted or ranked.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterEngine;

impl FilterEngine {
    pub fn apply(
        locations: &[Location],
        filters: &Filters,
        origin: Option<Point<f64>>,
    ) -> Vec<Location> {
        let filtered: Vec<Location> = locations
            .iter()
            .filter(|location| matches_filters(location, filters, origin))
            .cloned()
            .collect();

        tracing::debug!(
            "Filtered {} locations down to {} (origin: {})",
            locations.len(),
            filtered.len(),
            origin.is_some()
        );

        filtered
    }
}
