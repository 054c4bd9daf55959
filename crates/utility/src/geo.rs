pub const EARTH_RADIUS_KM: f64 = 6371.0;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Great-circle distance in kilometers between two coordinate pairs.
pub fn haversine_distance_km(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lon1_rad = to_radians(longitude_1);
    let lat2_rad = to_radians(latitude_2);
    let lon2_rad = to_radians(longitude_2);

    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Flat viewbox of `radius_deg` degrees around a point, in the
/// `(left, bottom, right, top)` order Nominatim expects.
///
/// This is deliberately a plain degree offset rather than a
/// distance-corrected box; the postal code search only needs a rough
/// neighborhood around the point.
pub fn degree_viewbox(
    latitude: f64,
    longitude: f64,
    radius_deg: f64,
) -> (f64, f64, f64, f64) {
    (
        longitude - radius_deg,
        latitude - radius_deg,
        longitude + radius_deg,
        latitude + radius_deg,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_zero_for_identical_points() {
        let d = haversine_distance_km(-15.77972, -47.92972, -15.77972, -47.92972);
        assert!(d.abs() < 1e-9);
    }

    #[test]
    fn haversine_brasilia_to_braganca() {
        // Brasília to Bragança (PA), roughly 1650 km great-circle.
        let d = haversine_distance_km(-15.77972, -47.92972, -1.0511, -46.7631);
        assert!((d - 1642.0).abs() < 20.0, "got {d}");
    }

    #[test]
    fn haversine_is_symmetric() {
        let a = haversine_distance_km(10.0, 20.0, -30.0, 40.0);
        let b = haversine_distance_km(-30.0, 40.0, 10.0, 20.0);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn viewbox_orders_corners() {
        let (left, bottom, right, top) = degree_viewbox(-1.05, -46.76, 0.01);
        assert!((left - -46.77).abs() < 1e-9);
        assert!((bottom - -1.06).abs() < 1e-9);
        assert!((right - -46.75).abs() < 1e-9);
        assert!((top - -1.04).abs() < 1e-9);
    }
}
