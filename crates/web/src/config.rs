use std::env;

use geocoding::{NominatimConfig, NOMINATIM_URL};

/// Server configuration, read from the environment with sensible
/// defaults for every key.
#[derive(Debug, Clone)]
pub struct WebConfig {
    pub bind_address: String,
    pub static_dir: String,
    pub nominatim: NominatimConfig,
}

impl WebConfig {
    pub fn from_env() -> Self {
        let defaults = NominatimConfig::default();
        Self {
            bind_address: var_or("BIND_ADDRESS", "0.0.0.0:8080"),
            static_dir: var_or("STATIC_DIR", "./resources/www/"),
            nominatim: NominatimConfig {
                base_url: var_or("NOMINATIM_URL", NOMINATIM_URL),
                user_agent: var_or("NOMINATIM_USER_AGENT", &defaults.user_agent),
            },
        }
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
