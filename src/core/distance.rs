use crate::models::{BoundingBox, Coordinate};

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometers (haversine).
///
/// # Arguments
/// * `a` - First point in WGS84 degrees
/// * `b` - Second point in WGS84 degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a_rad = a.latitude.to_radians();
    let lat_b_rad = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a_rad.cos() * lat_b_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Calculate a bounding box around a center point
///
/// This is much faster than haversine for pre-filtering radius queries.
/// 1° latitude ≈ 111km, 1° longitude ≈ 111km * cos(latitude)
///
/// # Arguments
/// * `center` - Center point in WGS84 degrees
/// * `radius_km` - Radius in kilometers
///
/// # Returns
/// BoundingBox with min/max lat/lon
pub fn bounding_box(center: Coordinate, radius_km: f64) -> BoundingBox {
    // 1 degree latitude is approximately 111 km
    let lat_delta = radius_km / 111.0;

    // 1 degree longitude varies by latitude
    let lon_delta = radius_km / (111.0 * center.latitude.to_radians().cos().abs());

    BoundingBox {
        min_lat: center.latitude - lat_delta,
        max_lat: center.latitude + lat_delta,
        min_lon: center.longitude - lon_delta,
        max_lon: center.longitude + lon_delta,
    }
}

/// Check if a point is within a bounding box
#[inline]
pub fn within_bounding_box(point: Coordinate, bbox: &BoundingBox) -> bool {
    point.latitude >= bbox.min_lat
        && point.latitude <= bbox.max_lat
        && point.longitude >= bbox.min_lon
        && point.longitude <= bbox.max_lon
}
