use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::geo::haversine_distance_km;

/// A latitude/longitude pair selected by the user.
///
/// Serializes to the `{"lat": .., "lng": ..}` shape the calculation
/// endpoint speaks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeoPoint {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both coordinates finite and inside the WGS84 value ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    pub fn distance_km_to(&self, other: &GeoPoint) -> f64 {
        haversine_distance_km(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }

    /// Coordinate text shown to the user, six decimal places.
    pub fn display_coordinates(&self) -> String {
        format!("{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_coordinates_has_six_decimal_places() {
        let point = GeoPoint::new(-15.779720, -47.929720);
        assert_eq!(point.display_coordinates(), "-15.779720, -47.929720");
    }

    #[test]
    fn wire_shape_uses_lat_lng() {
        let json = serde_json::to_value(GeoPoint::new(-1.0511, -46.7631)).unwrap();
        assert_eq!(json, serde_json::json!({"lat": -1.0511, "lng": -46.7631}));
    }

    #[test]
    fn validity_checks_ranges() {
        assert!(GeoPoint::new(-90.0, 180.0).is_valid());
        assert!(!GeoPoint::new(-90.1, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 180.5).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }
}
