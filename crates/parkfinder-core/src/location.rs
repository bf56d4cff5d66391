use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Center of the initial search when the user has not picked a destination
/// (Dortmund city center).
pub const DEFAULT_LOCATION: QueryLocation = QueryLocation {
    latitude: 51.514,
    longitude: 7.465,
};

/// The point a ranking session searches around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl QueryLocation {
    /// Builds a location after checking both coordinates are finite and in
    /// WGS84 range.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinate`] for NaN, infinite, or
    /// out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoreError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(CoreError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl std::fmt::Display for QueryLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}
