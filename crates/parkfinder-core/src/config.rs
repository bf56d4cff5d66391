use std::time::Duration;

use crate::app_config::AppConfig;
use crate::location::{QueryLocation, DEFAULT_LOCATION};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files. Useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default, so an empty environment yields a working
/// config pointed at a local lookup service and the public Nominatim instance.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: f64| -> Result<f64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    let non_empty = |var: &str, default: &str| -> Result<String, ConfigError> {
        let value = or_default(var, default);
        if value.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(value)
    };

    let api_base_url = non_empty("PARKFINDER_API_BASE_URL", "http://127.0.0.1:5000")?;
    let geocoder_url = non_empty(
        "PARKFINDER_GEOCODER_URL",
        "https://nominatim.openstreetmap.org/search",
    )?;
    let locality = or_default("PARKFINDER_LOCALITY", "Dortmund");

    let default_lat = parse_f64("PARKFINDER_DEFAULT_LAT", DEFAULT_LOCATION.latitude)?;
    let default_lon = parse_f64("PARKFINDER_DEFAULT_LON", DEFAULT_LOCATION.longitude)?;
    let default_location =
        QueryLocation::new(default_lat, default_lon).map_err(|e| ConfigError::InvalidEnvVar {
            var: "PARKFINDER_DEFAULT_LAT/PARKFINDER_DEFAULT_LON".to_string(),
            reason: e.to_string(),
        })?;
    let default_label = or_default("PARKFINDER_DEFAULT_LABEL", "Dortmund");

    let accept_language = non_empty("PARKFINDER_ACCEPT_LANGUAGE", "en")?;
    let search_debounce =
        Duration::from_millis(parse_u64("PARKFINDER_SEARCH_DEBOUNCE_MS", "500")?);
    let request_timeout_secs = parse_u64("PARKFINDER_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = non_empty("PARKFINDER_USER_AGENT", "parkfinder/0.1 (parking-search)")?;
    let log_level = or_default("PARKFINDER_LOG_LEVEL", "info");

    Ok(AppConfig {
        api_base_url,
        geocoder_url,
        locality,
        default_location,
        default_label,
        accept_language,
        search_debounce,
        request_timeout_secs,
        user_agent,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
