//! Parking facility records as returned by the lookup service.

use serde::{Deserialize, Deserializer, Serialize};

use crate::location::QueryLocation;

/// Shown for facilities the service lists without a usable name.
pub const UNNAMED_FACILITY: &str = "Unnamed parking";

/// One parking facility candidate.
///
/// The lookup service returns these already ordered best-first; nothing in
/// this workspace reorders or mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    /// `null`, blank, or missing on the wire becomes [`UNNAMED_FACILITY`].
    #[serde(default = "unnamed", deserialize_with = "name_or_unnamed")]
    pub name: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    /// Free spaces at the time of the lookup.
    #[serde(rename = "frei")]
    pub free_spaces: u32,
    pub capacity: u32,
    /// Omitted by the service when the request carried no location.
    #[serde(default)]
    pub distance_km: f64,
    pub price_per_hour: f64,
}

fn unnamed() -> String {
    UNNAMED_FACILITY.to_owned()
}

fn name_or_unnamed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(unnamed))
}

impl Facility {
    /// Facility position as a map coordinate.
    #[must_use]
    pub fn location(&self) -> QueryLocation {
        QueryLocation {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Fraction of spaces currently free, or `None` when capacity is zero.
    #[must_use]
    pub fn availability_ratio(&self) -> Option<f64> {
        (self.capacity > 0).then(|| f64::from(self.free_spaces) / f64::from(self.capacity))
    }
}
