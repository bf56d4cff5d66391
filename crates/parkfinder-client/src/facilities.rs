//! HTTP client for the facility-lookup service (`GET /api/parkings`).

use std::time::Duration;

use parkfinder_core::{Facility, QueryLocation};
use reqwest::{Client, Url};

use crate::error::ClientError;

const PARKINGS_PATH: &str = "api/parkings";

/// Client for the facility-lookup service.
///
/// The service returns facilities already ordered best-first; this client
/// passes that order through untouched. No retries: a failed lookup is
/// reported to the caller, which keeps whatever it rendered before.
#[derive(Clone)]
pub struct FacilityClient {
    client: Client,
    base_url: Url,
}

impl FacilityClient {
    /// Creates a client for the service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // A single trailing slash makes `join` append to the base path
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Fetches available facilities around `location`, best first.
    ///
    /// An empty array is a valid answer and is returned as an empty `Vec`.
    /// Records that do not decode are skipped with a warning; the rest keep
    /// their order.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or timeout.
    /// - [`ClientError::UnexpectedStatus`] on any non-2xx status.
    /// - [`ClientError::Deserialize`] if the body is not a JSON array.
    pub async fn fetch_facilities(
        &self,
        location: QueryLocation,
    ) -> Result<Vec<Facility>, ClientError> {
        let url = self.parkings_url(location)?;
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let records: Vec<serde_json::Value> =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: format!("facility lookup at {location}"),
                source: e,
            })?;

        let facilities: Vec<Facility> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value(record) {
                Ok(facility) => Some(facility),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping unusable facility record");
                    None
                }
            })
            .collect();

        tracing::debug!(
            %location,
            count = facilities.len(),
            "facility lookup returned"
        );
        Ok(facilities)
    }

    /// Builds `{base}/api/parkings?available=true&lat=..&lon=..`.
    fn parkings_url(&self, location: QueryLocation) -> Result<Url, ClientError> {
        let mut url = self
            .base_url
            .join(PARKINGS_PATH)
            .map_err(|e| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("available", "true")
            .append_pair("lat", &location.latitude.to_string())
            .append_pair("lon", &location.longitude.to_string());
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> FacilityClient {
        FacilityClient::new(base, 5, "parkfinder-test/0.1").unwrap()
    }

    #[test]
    fn parkings_url_carries_availability_and_location() {
        let url = client("http://localhost:5000")
            .parkings_url(QueryLocation {
                latitude: 51.514,
                longitude: 7.465,
            })
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/parkings?available=true&lat=51.514&lon=7.465"
        );
    }

    #[test]
    fn parkings_url_keeps_base_path() {
        let url = client("https://example.com/widget/")
            .parkings_url(QueryLocation {
                latitude: 1.0,
                longitude: 2.5,
            })
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/widget/api/parkings?available=true&lat=1&lon=2.5"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let result = FacilityClient::new("not a url", 5, "parkfinder-test/0.1");
        assert!(
            matches!(result, Err(ClientError::InvalidBaseUrl { .. })),
            "expected InvalidBaseUrl"
        );
    }
}
