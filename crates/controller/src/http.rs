use async_trait::async_trait;
use log::debug;
use model::{CalculationRequest, CalculationResponse, ErrorResponse};

use crate::{CalculationApi, CalculationError};

/// Calculation client talking to the server's `POST /api/calculate`.
pub struct HttpCalculationClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpCalculationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CalculationApi for HttpCalculationClient {
    async fn calculate(
        &self,
        request: CalculationRequest,
    ) -> Result<CalculationResponse, CalculationError> {
        let url = format!("{}/api/calculate", self.base_url);
        debug!("Posting calculation request to '{url}'.");

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|why| CalculationError::Network(why.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CalculationError::Transport {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|why| CalculationError::Network(why.to_string()))?;

        /* a 2xx body may still carry an explicit error field */
        if let Ok(error) = serde_json::from_str::<ErrorResponse>(&body) {
            return Err(CalculationError::Service(error.error));
        }

        serde_json::from_str(&body)
            .map_err(|why| CalculationError::Network(format!("resposta inválida: {why}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = HttpCalculationClient::new("http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
