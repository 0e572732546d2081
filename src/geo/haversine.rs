//! Great-circle distance.

/// Mean Earth radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Great-circle distance between two points, in miles.
///
/// Uses the haversine formula. Accurate enough for field-service routing;
/// does not account for road networks or terrain.
///
/// # Examples
///
/// ```
/// use dispatch_routing::geo::haversine_distance;
///
/// // Denver downtown to Five Points, roughly a mile
/// let d = haversine_distance(39.7392, -104.9903, 39.7506, -104.9998);
/// assert!(d > 0.8 && d < 1.1);
/// assert_eq!(haversine_distance(39.7, -105.0, 39.7, -105.0), 0.0);
/// ```
pub fn haversine_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let (lat1_r, lng1_r) = (lat1.to_radians(), lng1.to_radians());
    let (lat2_r, lng2_r) = (lat2.to_radians(), lng2.to_radians());

    let dlat = lat2_r - lat1_r;
    let dlng = lng2_r - lng1_r;

    let a = (dlat / 2.0).sin().powi(2) + lat1_r.cos() * lat2_r.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(haversine_distance(39.7392, -104.9903, 39.7392, -104.9903), 0.0);
    }

    #[test]
    fn test_denver_to_aurora() {
        // Roughly 10 miles
        let d = haversine_distance(39.7392, -104.9903, 39.7294, -104.8319);
        assert!(d > 8.0 && d < 12.0, "got {d}");
    }

    #[test]
    fn test_symmetric() {
        let ab = haversine_distance(39.74, -104.99, 39.58, -104.88);
        let ba = haversine_distance(39.58, -104.88, 39.74, -104.99);
        assert!((ab - ba).abs() < 1e-12);
    }

    #[test]
    fn test_antipodal_near_half_circumference() {
        let d = haversine_distance(0.0, 0.0, 0.0, 180.0);
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_MILES).abs() < 1.0);
    }
}
