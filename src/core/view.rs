use geo::Point;
use tracing::{debug, warn};
use validator::Validate;

use crate::core::filters::FilterEngine;
use crate::core::store::{LocationStore, StoreError};
use crate::models::{Filters, FiltersPatch, Location};

/// Current filter selection and user position for the map
///
/// The visible subset is recomputed from the store on every call to
/// [`MapView::visible`], so it always reflects the latest collection and
/// filters.
#[derive(Debug, Clone)]
pub struct MapView {
    filters: Filters,
    defaults: Filters,
    origin: Option<Point<f64>>,
}

impl MapView {
    /// Create a view whose reset target is `defaults`
    pub fn new(defaults: Filters) -> Result<Self, StoreError> {
        defaults.validate()?;

        Ok(Self {
            filters: defaults.clone(),
            defaults,
            origin: None,
        })
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn origin(&self) -> Option<Point<f64>> {
        self.origin
    }

    /// Set or clear the user's position; without one, distance is not filtered
    pub fn set_origin(&mut self, origin: Option<Point<f64>>) {
        self.origin = origin;
    }

    /// Lay a partial update over the current filters
    ///
    /// The current filters stay untouched when the merged result is invalid.
    pub fn update_filters(&mut self, patch: FiltersPatch) -> Result<&Filters, StoreError> {
        let candidate = self.filters.merged(patch);
        if let Err(errors) = candidate.validate() {
            warn!("Rejected filter update: {}", errors);
            return Err(errors.into());
        }

        debug!("Filters updated: {:?}", candidate);
        self.filters = candidate;
        Ok(&self.filters)
    }

    pub fn reset_filters(&mut self) {
        self.filters = self.defaults.clone();
    }

    /// Locations in `store` passing the current filters, in store order
    pub fn visible(&self, store: &LocationStore) -> Vec<Location> {
        FilterEngine::apply(store.locations(), &self.filters, self.origin)
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            filters: Filters::default(),
            defaults: Filters::default(),
            origin: None,
        }
    }
}
