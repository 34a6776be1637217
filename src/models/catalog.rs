use crate::models::domain::{AccessibilityFeature, AccessibilityFeatureName, IconTag};

/// Names with a catalog entry, in catalog order
pub const CATALOG_FEATURES: [AccessibilityFeatureName; 9] = [
    AccessibilityFeatureName::WheelchairAccessible,
    AccessibilityFeatureName::AccessibleParking,
    AccessibilityFeatureName::AccessibleRestroom,
    AccessibilityFeatureName::BrailleSignage,
    AccessibilityFeatureName::Elevator,
    AccessibilityFeatureName::Ramp,
    AccessibilityFeatureName::WideDoorways,
    AccessibilityFeatureName::HearingLoop,
    AccessibilityFeatureName::ServiceAnimalsWelcome,
];

impl AccessibilityFeatureName {
    /// Catalog entry for this feature, `None` for reserved names
    pub fn catalog_entry(self) -> Option<AccessibilityFeature> {
        let (id, description, icon) = match self {
            AccessibilityFeatureName::WheelchairAccessible => {
                ("f1", "Wheelchair accessible entrance and interior", IconTag::Wheelchair)
            }
            AccessibilityFeatureName::AccessibleParking => {
                ("f2", "Designated accessible parking spaces", IconTag::ParkingSquare)
            }
            AccessibilityFeatureName::AccessibleRestroom => {
                ("f3", "Accessible restroom facilities", IconTag::Bath)
            }
            AccessibilityFeatureName::BrailleSignage => {
                ("f4", "Braille signage available", IconTag::Braille)
            }
            AccessibilityFeatureName::Elevator => ("f5", "Elevator access available", IconTag::Elevator),
            AccessibilityFeatureName::Ramp => ("f6", "Ramp access available", IconTag::MoveUp),
            AccessibilityFeatureName::WideDoorways => {
                ("f7", "Wide doorways for wheelchair access", IconTag::Door)
            }
            AccessibilityFeatureName::HearingLoop => ("f8", "Hearing loop system available", IconTag::Ear),
            AccessibilityFeatureName::ServiceAnimalsWelcome => {
                ("f9", "Service animals welcome", IconTag::Dog)
            }
            _ => return None,
        };

        Some(AccessibilityFeature {
            id: id.to_string(),
            name: self,
            description: description.to_string(),
            icon,
        })
    }
}

/// The fixed feature catalog loaded at startup
pub fn feature_catalog() -> Vec<AccessibilityFeature> {
    CATALOG_FEATURES
        .iter()
        .filter_map(|name| name.catalog_entry())
        .collect()
}
