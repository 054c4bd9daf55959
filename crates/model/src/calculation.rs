use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{GeoPoint, PostalInfo};

/// Body of `POST /api/calculate`. Field names are part of the wire
/// contract with the page client.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CalculationRequest {
    #[serde(rename = "ponto1")]
    pub origin: GeoPoint,
    #[serde(rename = "ponto2")]
    pub destination: GeoPoint,
}

impl CalculationRequest {
    pub fn new(origin: GeoPoint, destination: GeoPoint) -> Self {
        Self {
            origin,
            destination,
        }
    }
}

/// Successful calculation: distance in kilometers plus the postal code
/// resolved at each point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CalculationResponse {
    #[serde(rename = "distancia")]
    pub distance_km: f64,
    #[serde(rename = "cep1")]
    pub origin_postal: PostalInfo,
    #[serde(rename = "cep2")]
    pub destination_postal: PostalInfo,
}

/// Error body the endpoint returns alongside a non-2xx status (and the
/// shape the client probes for inside 2xx responses).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
