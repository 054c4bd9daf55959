use std::sync::Arc;

use geocoding::NominatimClient;
use web::{start_web_server, WebConfig, WebState};

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = WebConfig::from_env();

    // geocoding
    let postal_resolver = NominatimClient::new(config.nominatim.clone())
        .expect("could not build the nominatim client.");

    // web server
    let web_future = start_web_server(
        &config,
        WebState {
            postal_resolver: Arc::new(postal_resolver),
        },
    );

    let _ = web_future.await;
}
