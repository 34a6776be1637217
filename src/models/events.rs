use serde::Serialize;

use crate::models::domain::{Location, Review};

/// Change notification published after each committed store mutation
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StoreEvent {
    LocationCreated { location: Location },
    LocationUpdated { location: Location },
    ReviewAttached { review: Review, location: Location },
}

impl StoreEvent {
    /// The location as it stood right after the mutation
    pub fn location(&self) -> &Location {
        match self {
            StoreEvent::LocationCreated { location }
            | StoreEvent::LocationUpdated { location }
            | StoreEvent::ReviewAttached { location, .. } => location,
        }
    }
}
