use axum::{
    extract::{OriginalUri, Request},
    http::StatusCode,
    response::IntoResponse,
    routing::MethodFilter,
    Json,
};
use model::ErrorResponse;
use schemars::{schema_for, JsonSchema};

pub type RouteResult<O> = Result<O, RouteError>;

/// A `MethodFilter` that matches all http methods.
pub(crate) const METHOD_FILTER_ALL: MethodFilter = MethodFilter::GET
    .or(MethodFilter::POST)
    .or(MethodFilter::PATCH)
    .or(MethodFilter::PUT)
    .or(MethodFilter::DELETE);

/// Error reply in the `{"error": string}` wire shape the page client
/// probes for.
#[derive(Debug, Clone)]
pub struct RouteError {
    pub status_code: StatusCode,
    pub body: ErrorResponse,
}

impl RouteError {
    pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code,
            body: ErrorResponse::new(message),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code, Json(self.body)).into_response()
    }
}

pub(crate) async fn schema<T: JsonSchema>() -> impl IntoResponse {
    Json(schema_for!(T))
}

pub(crate) async fn route_not_found(
    OriginalUri(original_uri): OriginalUri,
    req: Request,
) -> impl IntoResponse {
    RouteError::new(
        StatusCode::NOT_FOUND,
        format!("{} {} não encontrado.", req.method(), original_uri.path()),
    )
}
