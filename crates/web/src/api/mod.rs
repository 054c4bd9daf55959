use axum::{
    response::IntoResponse,
    routing::{get, on, post},
    Json, Router,
};
use model::CalculationResponse;
use serde_json::json;

pub mod calculate;

use crate::{
    common::{route_not_found, schema, METHOD_FILTER_ALL},
    WebState,
};

pub fn routes(state: WebState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/calculate", post(calculate::calculate))
        .route("/calculate/schema", get(schema::<CalculationResponse>))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn ping() -> impl IntoResponse {
    Json(json!({
        "message": "pong!"
    }))
}
