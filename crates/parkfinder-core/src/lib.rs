pub mod app_config;
pub mod config;
pub mod facility;
pub mod links;
pub mod location;
pub mod tier;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use facility::{Facility, UNNAMED_FACILITY};
pub use links::{navigation_links, NavigationApp, NavigationLink};
pub use location::{QueryLocation, DEFAULT_LOCATION};
pub use tier::{classify, display_tier, IconSpec, Tier};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
