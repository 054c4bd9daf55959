pub use crate::common::RouteResult;
pub use crate::config::WebConfig;

use std::sync::Arc;

use axum::{routing::get_service, Router};
use geocoding::PostalResolver;
use log::info;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

pub mod api;
pub mod common;
pub mod config;

#[derive(Clone)]
pub struct WebState {
    pub postal_resolver: Arc<dyn PostalResolver>,
}

pub async fn start_web_server(
    config: &WebConfig,
    state: WebState,
) -> std::io::Result<()> {
    let routes = Router::new()
        .nest_service("/api", api::routes(state))
        .fallback_service(static_content_router(&config.static_dir));

    let listener = TcpListener::bind(&config.bind_address).await?;
    info!("Listening on {}.", config.bind_address);
    axum::serve(listener, routes.into_make_service()).await?;

    Ok(())
}

fn static_content_router(static_dir: &str) -> Router {
    Router::new().nest_service("/", get_service(ServeDir::new(static_dir)))
}
