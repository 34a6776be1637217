use geo::Point;

use crate::models::BoundingBox;

/// Kilometres per degree used by the planar approximation
pub const KM_PER_DEGREE: f64 = 111.0;

/// Approximate distance between two points in kilometres
///
/// Equirectangular (planar) approximation: latitude and longitude deltas are
/// treated as Cartesian and scaled by 111 km per degree. Only valid for short
/// distances near the deployment's latitude band; this is not a great-circle
/// distance and must not be swapped for one, since filter results depend on it.
///
/// Points are `geo` points, x = longitude, y = latitude.
#[inline]
pub fn distance_km(a: Point<f64>, b: Point<f64>) -> f64 {
    let delta_lat = a.y() - b.y();
    let delta_lng = a.x() - b.x();

    (delta_lat * delta_lat + delta_lng * delta_lng).sqrt() * KM_PER_DEGREE
}

/// Calculate a bounding box around a center point
///
/// Under the planar metric a radius of `r` km spans `r / 111` degrees on both
/// axes, so every point within `r` of the center lies inside the box.
pub fn calculate_bounding_box(center: Point<f64>, radius_km: f64) -> BoundingBox {
    let delta = radius_km / KM_PER_DEGREE;

    BoundingBox {
        min_lat: center.y() - delta,
        max_lat: center.y() + delta,
        min_lng: center.x() - delta,
        max_lng: center.x() + delta,
    }
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(point: Point<f64>, bbox: &BoundingBox) -> bool {
    point.y() >= bbox.min_lat
        && point.y() <= bbox.max_lat
        && point.x() >= bbox.min_lng
        && point.x() <= bbox.max_lng
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_self_is_zero() {
        let charminar = Point::new(78.4747, 17.3616);
        assert_eq!(distance_km(charminar, charminar), 0.0);
    }

    #[test]
    fn test_planar_distance() {
        // Charminar to Ameerpet metro
        let charminar = Point::new(78.4747, 17.3616);
        let ameerpet = Point::new(78.4487, 17.4374);

        let distance = distance_km(charminar, ameerpet);
        assert!((distance - 8.895).abs() < 0.01, "Distance should be ~8.895km, got {}", distance);
        assert_eq!(distance, distance_km(ameerpet, charminar));
    }

    #[test]
    fn test_one_degree_is_111_km() {
        let a = Point::new(78.0, 17.0);
        let b = Point::new(78.0, 18.0);
        assert!((distance_km(a, b) - 111.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounding_box() {
        let center = Point::new(78.4747, 17.3616);
        let bbox = calculate_bounding_box(center, 11.1);

        assert!((bbox.max_lat - bbox.min_lat - 0.2).abs() < 1e-9);
        assert!((bbox.max_lng - bbox.min_lng - 0.2).abs() < 1e-9);
        assert!(is_within_bounding_box(center, &bbox));
        assert!(!is_within_bounding_box(Point::new(78.4747, 17.5), &bbox));
    }
}
