use std::time::Duration;

use crate::location::QueryLocation;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Origin of the facility-lookup service (`/api/parkings` is appended).
    pub api_base_url: String,
    /// Full search endpoint of the geocoding service.
    pub geocoder_url: String,
    /// Appended to every destination query to keep results local.
    pub locality: String,
    pub default_location: QueryLocation,
    /// Shown in the popup of the default location marker.
    pub default_label: String,
    pub accept_language: String,
    pub search_debounce: Duration,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
}
