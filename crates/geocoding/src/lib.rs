use std::error;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use model::{GeoPoint, PostalInfo};

pub mod client;

pub use client::{NominatimClient, NominatimConfig, NOMINATIM_URL};

/// Resolves the postal code at a coordinate. The calculation endpoint
/// depends on this seam, not on Nominatim directly.
#[async_trait]
pub trait PostalResolver: Send + Sync {
    /// Never fails: resolution problems degrade to the `nenhum`/`erro`
    /// postal kinds.
    async fn resolve(&self, point: GeoPoint) -> PostalInfo;
}

#[derive(Debug, Clone)]
pub enum GeocodingError {
    RequestError(Arc<reqwest::Error>),
    InvalidResponse {
        status_code: reqwest::StatusCode,
        url: String,
    },
}

impl error::Error for GeocodingError {}

impl fmt::Display for GeocodingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GeocodingError::RequestError(e) => write!(f, "HTTP request error: {}", e),
            GeocodingError::InvalidResponse { status_code, url } => {
                write!(f, "Invalid Response ({}) {}", status_code, url)
            }
        }
    }
}

impl From<reqwest::Error> for GeocodingError {
    fn from(e: reqwest::Error) -> Self {
        GeocodingError::RequestError(Arc::new(e))
    }
}
