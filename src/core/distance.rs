use crate::models::ReferencePoint;
use std::cmp::Ordering;

/// Earth's mean radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers. NaN input yields NaN, never a panic.
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance from a reference point to a coordinate pair
#[inline]
pub fn distance_from(origin: &ReferencePoint, latitude: f64, longitude: f64) -> f64 {
    haversine_distance(origin.latitude, origin.longitude, latitude, longitude)
}

/// Sort key for an optional distance: missing or NaN distances count as infinitely far
#[inline]
pub fn sort_key(distance_km: Option<f64>) -> f64 {
    match distance_km {
        Some(d) if !d.is_nan() => d,
        _ => f64::INFINITY,
    }
}

/// Ascending distance ordering where unknown distances go last
#[inline]
pub fn compare_distances(a: Option<f64>, b: Option<f64>) -> Ordering {
    sort_key(a).total_cmp(&sort_key(b))
}

/// Human-readable distance: meters below 1 km, otherwise kilometers with one decimal
pub fn format_distance(distance_km: f64) -> String {
    // Decide on the rounded value so 999.6 m does not print as "1000 m"
    let meters = (distance_km * 1000.0).round();
    if meters < 1000.0 {
        format!("{} m", meters as i64)
    } else {
        format!("{:.1} km", distance_km)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_distance() {
        // São Paulo to Rio de Janeiro (approximately 360 km)
        let sp_lat = -23.5505;
        let sp_lon = -46.6333;
        let rj_lat = -22.9068;
        let rj_lon = -43.1729;

        let distance = haversine_distance(sp_lat, sp_lon, rj_lat, rj_lon);
        assert!((distance - 360.0).abs() < 10.0, "Distance should be ~360km, got {}", distance);
    }

    #[test]
    fn test_symmetry_and_zero() {
        let a = (-15.7939, -47.8828);
        let b = (-3.7319, -38.5267);

        let ab = haversine_distance(a.0, a.1, b.0, b.1);
        let ba = haversine_distance(b.0, b.1, a.0, a.1);
        assert!((ab - ba).abs() < 1e-9);
        assert_eq!(haversine_distance(a.0, a.1, a.0, a.1), 0.0);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(haversine_distance(f64::NAN, 0.0, 0.0, 0.0).is_nan());
    }

    #[test]
    fn test_unknown_distance_sorts_last() {
        assert_eq!(compare_distances(Some(10.0), None), Ordering::Less);
        assert_eq!(compare_distances(Some(f64::NAN), Some(9000.0)), Ordering::Greater);
        assert_eq!(compare_distances(Some(5.0), Some(5.0)), Ordering::Equal);
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(0.85), "850 m");
        assert_eq!(format_distance(12.345), "12.3 km");
        assert_eq!(format_distance(1.0), "1.0 km");
    }

    #[test]
    fn test_format_distance_just_below_one_km() {
        assert_eq!(format_distance(0.9994), "999 m");
        assert_eq!(format_distance(0.9996), "1.0 km");
    }
}
