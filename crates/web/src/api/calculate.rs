use axum::{extract::State, Json};
use log::info;
use model::{CalculationRequest, CalculationResponse};
use serde_json::Value;

use crate::{
    common::{RouteError, RouteResult},
    WebState,
};

/// `POST /api/calculate`: distance between the two points plus the
/// postal code resolved at each of them.
pub(crate) async fn calculate(
    State(WebState { postal_resolver }): State<WebState>,
    Json(body): Json<Value>,
) -> RouteResult<Json<CalculationResponse>> {
    let request: CalculationRequest = serde_json::from_value(body).map_err(|_| {
        RouteError::bad_request(
            "Dados incompletos. Dois pontos com coordenadas lat/lng são necessários.",
        )
    })?;

    if !request.origin.is_valid() || !request.destination.is_valid() {
        return Err(RouteError::bad_request(
            "Formato inválido. Coordenadas lat/lng fora do intervalo.",
        ));
    }

    info!(
        "Calculando distância entre: ({}) e ({}).",
        request.origin.display_coordinates(),
        request.destination.display_coordinates()
    );

    let distance_km = round_km(request.origin.distance_km_to(&request.destination));

    // a resolver failure degrades to the `erro` kind on that side, it
    // never fails the whole request
    let (origin_postal, destination_postal) = tokio::join!(
        postal_resolver.resolve(request.origin),
        postal_resolver.resolve(request.destination),
    );

    Ok(Json(CalculationResponse {
        distance_km,
        origin_postal,
        destination_postal,
    }))
}

fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use geocoding::PostalResolver;
    use model::{GeoPoint, PostalInfo, PostalKind};
    use serde_json::json;

    use super::*;

    /// Southern-hemisphere points resolve, northern ones fail.
    struct StubResolver;

    #[async_trait]
    impl PostalResolver for StubResolver {
        async fn resolve(&self, point: GeoPoint) -> PostalInfo {
            if point.latitude < 0.0 {
                PostalInfo::new("68600-000", PostalKind::Exact)
            } else {
                PostalInfo::failed()
            }
        }
    }

    fn state() -> WebState {
        WebState {
            postal_resolver: Arc::new(StubResolver),
        }
    }

    #[tokio::test]
    async fn valid_request_returns_rounded_distance_and_postals() {
        let body = json!({
            "ponto1": {"lat": -15.77972, "lng": -47.92972},
            "ponto2": {"lat": -1.0511, "lng": -46.7631},
        });

        let Json(response) = calculate(State(state()), Json(body)).await.unwrap();

        assert!(response.distance_km > 1500.0 && response.distance_km < 1800.0);
        // rounded to two decimal places
        assert!(((response.distance_km * 100.0).round() - response.distance_km * 100.0)
            .abs()
            < 1e-9);
        assert_eq!(response.origin_postal.code, "68600-000");
        assert_eq!(response.origin_postal.kind, PostalKind::Exact);
    }

    #[tokio::test]
    async fn identical_points_have_zero_distance() {
        let body = json!({
            "ponto1": {"lat": -1.0511, "lng": -46.7631},
            "ponto2": {"lat": -1.0511, "lng": -46.7631},
        });

        let Json(response) = calculate(State(state()), Json(body)).await.unwrap();
        assert_eq!(response.distance_km, 0.0);
    }

    #[tokio::test]
    async fn missing_point_is_a_bad_request() {
        let body = json!({"ponto1": {"lat": -1.0511, "lng": -46.7631}});

        let error = calculate(State(state()), Json(body)).await.unwrap_err();
        assert_eq!(error.status_code, StatusCode::BAD_REQUEST);
        assert!(error.body.error.contains("Dados incompletos"));
    }

    #[tokio::test]
    async fn out_of_range_coordinates_are_a_bad_request() {
        let body = json!({
            "ponto1": {"lat": 100.0, "lng": 0.0},
            "ponto2": {"lat": 0.0, "lng": 0.0},
        });

        let error = calculate(State(state()), Json(body)).await.unwrap_err();
        assert_eq!(error.status_code, StatusCode::BAD_REQUEST);
        assert!(error.body.error.contains("Formato inválido"));
    }

    #[tokio::test]
    async fn resolver_failure_degrades_to_the_erro_kind() {
        let body = json!({
            "ponto1": {"lat": -1.0511, "lng": -46.7631},
            "ponto2": {"lat": 40.0, "lng": -3.0},
        });

        let Json(response) = calculate(State(state()), Json(body)).await.unwrap();
        assert_eq!(response.origin_postal.kind, PostalKind::Exact);
        assert_eq!(response.destination_postal.kind, PostalKind::Failed);
        assert_eq!(response.destination_postal.code, "Erro ao obter CEP");
    }

    #[test]
    fn round_km_keeps_two_decimals() {
        assert_eq!(round_km(1.0 / 3.0), 0.33);
        assert_eq!(round_km(2.0 / 3.0), 0.67);
        assert_eq!(round_km(0.0), 0.0);
    }
}
