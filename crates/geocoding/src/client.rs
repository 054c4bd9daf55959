use async_trait::async_trait;
use log::{debug, warn};
use model::{GeoPoint, PostalInfo, PostalKind};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use utility::geo::degree_viewbox;

use crate::{GeocodingError, PostalResolver};

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Search-box radii in degrees, tried smallest first.
const SEARCH_RADII_DEG: [f64; 5] = [0.001, 0.005, 0.01, 0.05, 0.1];

/// Reverse-lookup zoom that answers with city granularity.
const CITY_ZOOM: u8 = 10;

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    pub user_agent: String,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: NOMINATIM_URL.to_owned(),
            user_agent: "DistanceCalculator/1.0".to_owned(),
        }
    }
}

/// One place returned by Nominatim. Unknown fields are ignored; the
/// reverse endpoint reports failures as `{"error": ...}`, which parses
/// to a place without an address.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub address: Option<Address>,
}

impl Place {
    pub fn postcode(&self) -> Option<&str> {
        self.address.as_ref().and_then(Address::find_postcode)
    }
}

/// Address details of a place. Postcodes show up under several field
/// spellings depending on the data source, so all of them are probed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub postalcode: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub zipcode: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub municipality: Option<String>,
}

impl Address {
    pub fn find_postcode(&self) -> Option<&str> {
        [
            &self.postcode,
            &self.postalcode,
            &self.postal_code,
            &self.zip,
            &self.zipcode,
        ]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .find(|code| !code.is_empty())
    }

    pub fn find_city(&self) -> Option<&str> {
        [&self.city, &self.town, &self.municipality]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|name| !name.is_empty())
    }
}

pub struct NominatimClient {
    config: NominatimConfig,
    http: reqwest::Client,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, GeocodingError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { config, http })
    }

    /// Fetch data from an endpoint using this client.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, GeocodingError> {
        let url = format!("{}/{}", self.config.base_url, path);
        debug!("Requesting '{url}'.");

        let response = self.http.get(&url).query(params).send().await?;

        match response.status() {
            reqwest::StatusCode::OK => Ok(response.json().await?),
            other => Err(GeocodingError::InvalidResponse {
                status_code: other,
                url,
            }),
        }
    }

    /// Reverse lookup at a point, optionally at a coarser zoom.
    pub async fn reverse(
        &self,
        latitude: f64,
        longitude: f64,
        zoom: Option<u8>,
    ) -> Result<Place, GeocodingError> {
        let mut params = vec![
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("format", "json".to_owned()),
            ("addressdetails", "1".to_owned()),
        ];
        if let Some(zoom) = zoom {
            params.push(("zoom", zoom.to_string()));
        }
        self.get("reverse", &params).await
    }

    /// Top hit inside a degree box around the point.
    pub async fn search_viewbox(
        &self,
        latitude: f64,
        longitude: f64,
        radius_deg: f64,
    ) -> Result<Vec<Place>, GeocodingError> {
        let (left, bottom, right, top) = degree_viewbox(latitude, longitude, radius_deg);
        let params = [
            ("format", "json".to_owned()),
            ("addressdetails", "1".to_owned()),
            ("limit", "1".to_owned()),
            ("viewbox", format!("{left},{bottom},{right},{top}")),
            ("bounded", "1".to_owned()),
        ];
        self.get("search", &params).await
    }

    /// Forward search for a Brazilian city by name.
    pub async fn search_city(&self, city: &str) -> Result<Vec<Place>, GeocodingError> {
        let params = [
            ("format", "json".to_owned()),
            ("city", city.to_owned()),
            ("country", "Brazil".to_owned()),
            ("addressdetails", "1".to_owned()),
            ("limit", "1".to_owned()),
        ];
        self.get("search", &params).await
    }

    /// City-level fallback: coarse reverse lookup, then a search for the
    /// city's own postcode when the reverse answer carries none.
    async fn city_postcode(&self, point: GeoPoint) -> Result<Option<String>, GeocodingError> {
        let place = self
            .reverse(point.latitude, point.longitude, Some(CITY_ZOOM))
            .await?;

        if let Some(code) = place.postcode() {
            return Ok(Some(code.to_owned()));
        }

        let Some(city) = place.address.as_ref().and_then(Address::find_city) else {
            return Ok(None);
        };

        let places = self.search_city(city).await?;
        Ok(places
            .first()
            .and_then(Place::postcode)
            .map(str::to_owned))
    }
}

#[async_trait]
impl PostalResolver for NominatimClient {
    async fn resolve(&self, point: GeoPoint) -> PostalInfo {
        let mut tier_failed = false;

        /* exact reverse lookup at the point */
        match self.reverse(point.latitude, point.longitude, None).await {
            Ok(place) => {
                if let Some(code) = place.postcode() {
                    return PostalInfo::new(code, PostalKind::Exact);
                }
            }
            Err(why) => {
                warn!("Exact postcode lookup failed: {why}");
                tier_failed = true;
            }
        }

        /* widen the search box until something turns up */
        for radius in SEARCH_RADII_DEG {
            match self
                .search_viewbox(point.latitude, point.longitude, radius)
                .await
            {
                Ok(places) => {
                    if let Some(code) = places.first().and_then(Place::postcode) {
                        return PostalInfo::new(code, PostalKind::Approximate);
                    }
                }
                Err(why) => {
                    warn!("Postcode search with radius {radius} failed: {why}");
                    tier_failed = true;
                }
            }
        }

        /* settle for the city's postcode */
        match self.city_postcode(point).await {
            Ok(Some(code)) => return PostalInfo::new(code, PostalKind::City),
            Ok(None) => {}
            Err(why) => {
                warn!("City postcode lookup failed: {why}");
                tier_failed = true;
            }
        }

        if tier_failed {
            PostalInfo::failed()
        } else {
            PostalInfo::not_found()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postcode_prefers_canonical_spelling() {
        let address: Address = serde_json::from_str(
            r#"{"postcode": "68600-000", "zip": "00000-000"}"#,
        )
        .unwrap();
        assert_eq!(address.find_postcode(), Some("68600-000"));
    }

    #[test]
    fn postcode_falls_back_across_spellings() {
        let address: Address =
            serde_json::from_str(r#"{"postal_code": "70000-000"}"#).unwrap();
        assert_eq!(address.find_postcode(), Some("70000-000"));

        let address: Address = serde_json::from_str(r#"{"zipcode": "70040"}"#).unwrap();
        assert_eq!(address.find_postcode(), Some("70040"));
    }

    #[test]
    fn empty_postcode_fields_are_skipped() {
        let address: Address =
            serde_json::from_str(r#"{"postcode": "", "zip": "68600"}"#).unwrap();
        assert_eq!(address.find_postcode(), Some("68600"));
    }

    #[test]
    fn city_name_falls_back_to_town_and_municipality() {
        let address: Address =
            serde_json::from_str(r#"{"town": "Bragança"}"#).unwrap();
        assert_eq!(address.find_city(), Some("Bragança"));

        let address: Address =
            serde_json::from_str(r#"{"municipality": "Bragança"}"#).unwrap();
        assert_eq!(address.find_city(), Some("Bragança"));
    }

    #[test]
    fn reverse_error_body_parses_to_place_without_address() {
        let place: Place =
            serde_json::from_str(r#"{"error": "Unable to geocode"}"#).unwrap();
        assert!(place.address.is_none());
        assert!(place.postcode().is_none());
    }

    #[test]
    fn search_response_parses_as_list() {
        let places: Vec<Place> = serde_json::from_str(
            r#"[{"display_name": "x", "address": {"postcode": "68600-000"}}]"#,
        )
        .unwrap();
        assert_eq!(places.first().and_then(Place::postcode), Some("68600-000"));
    }
}
