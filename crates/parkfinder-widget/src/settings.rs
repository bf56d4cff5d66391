use std::time::Duration;

use parkfinder_core::{AppConfig, QueryLocation, DEFAULT_LOCATION};

use crate::debounce::SEARCH_DEBOUNCE;
use crate::render::FOCUS_ZOOM;

/// Fixed presentation parameters of a widget instance.
#[derive(Debug, Clone)]
pub struct WidgetSettings {
    pub default_location: QueryLocation,
    pub default_label: String,
    /// Zoom when showing the default location or a re-centered search.
    pub initial_zoom: u8,
    /// Zoom when a list entry focuses its facility.
    pub focus_zoom: u8,
    /// Zoom when a destination is picked from the suggestions.
    pub destination_zoom: u8,
    pub search_debounce: Duration,
    /// Shorter input clears the suggestions instead of searching.
    pub min_query_chars: usize,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            default_location: DEFAULT_LOCATION,
            default_label: "Dortmund".to_owned(),
            initial_zoom: 14,
            focus_zoom: FOCUS_ZOOM,
            destination_zoom: 14,
            search_debounce: SEARCH_DEBOUNCE,
            min_query_chars: 3,
        }
    }
}

impl WidgetSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            default_location: config.default_location,
            default_label: config.default_label.clone(),
            search_debounce: config.search_debounce,
            ..Self::default()
        }
    }
}
