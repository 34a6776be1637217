// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod rating;
pub mod store;
pub mod view;

pub use distance::{calculate_bounding_box, distance_km, is_within_bounding_box, KM_PER_DEGREE};
pub use filters::{
    matches_category, matches_distance, matches_features, matches_filters, matches_rating,
    FilterEngine,
};
pub use rating::{combine, mean_label, rating_label, round1};
pub use store::{LocationStore, SharedLocationStore, StoreError, DEFAULT_EVENT_CAPACITY};
pub use view::MapView;
