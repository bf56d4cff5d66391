//! Wire and domain types for the geocoding service.

use parkfinder_core::QueryLocation;
use serde::Deserialize;

/// One place record as Nominatim returns it. Coordinates arrive as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPlace {
    pub display_name: String,
    pub lat: String,
    pub lon: String,
}

/// A geocoded destination a user can pick.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub label: String,
    pub location: QueryLocation,
}

impl RawPlace {
    /// Parses the string coordinates; `None` if either is not a valid
    /// coordinate.
    #[must_use]
    pub fn into_place(self) -> Option<Place> {
        let latitude = self.lat.trim().parse::<f64>().ok()?;
        let longitude = self.lon.trim().parse::<f64>().ok()?;
        let location = QueryLocation::new(latitude, longitude).ok()?;
        Some(Place {
            label: self.display_name,
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(lat: &str, lon: &str) -> RawPlace {
        RawPlace {
            display_name: "Westfalenhallen, Dortmund".to_owned(),
            lat: lat.to_owned(),
            lon: lon.to_owned(),
        }
    }

    #[test]
    fn parses_string_coordinates() {
        let place = raw("51.4958", "7.4561").into_place().unwrap();
        assert_eq!(place.label, "Westfalenhallen, Dortmund");
        assert!((place.location.latitude - 51.4958).abs() < 1e-9);
        assert!((place.location.longitude - 7.4561).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_numeric_coordinates() {
        assert!(raw("fifty-one", "7.4").into_place().is_none());
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(raw("51.5", "700").into_place().is_none());
    }
}
