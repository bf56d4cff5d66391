//! HTTP client for the Nominatim geocoding search endpoint.

use std::time::Duration;

use reqwest::{header, Client, Url};

use crate::error::ClientError;
use crate::types::{Place, RawPlace};

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Per-request parameters that stay fixed for a widget's lifetime.
#[derive(Debug, Clone)]
pub struct GeocodeOptions {
    /// Appended to the free text (`"<text> <locality>"`); empty disables it.
    pub locality: String,
    /// Value of `limit`.
    pub limit: u32,
    /// Value of the `Accept-Language` header.
    pub accept_language: String,
}

impl Default for GeocodeOptions {
    fn default() -> Self {
        Self {
            locality: "Dortmund".to_owned(),
            limit: 5,
            accept_language: "en".to_owned(),
        }
    }
}

/// Client for destination search.
///
/// Nominatim's usage policy requires an identifying `User-Agent`, so one is
/// mandatory here. A failed search is never retried.
#[derive(Clone)]
pub struct GeocodeClient {
    client: Client,
    endpoint: Url,
    options: GeocodeOptions,
}

impl GeocodeClient {
    /// Creates a client for the search endpoint at `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `endpoint` does not parse.
    pub fn new(
        endpoint: &str,
        timeout_secs: u64,
        user_agent: &str,
        options: GeocodeOptions,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        let endpoint = Url::parse(endpoint).map_err(|e| ClientError::InvalidBaseUrl {
            url: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            client,
            endpoint,
            options,
        })
    }

    /// Searches for places matching `text` within the configured locality.
    ///
    /// Places whose coordinates do not parse are skipped with a warning
    /// rather than failing the whole search.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or timeout.
    /// - [`ClientError::UnexpectedStatus`] on any non-2xx status.
    /// - [`ClientError::Deserialize`] if the body is not a place array.
    pub async fn search(&self, text: &str) -> Result<Vec<Place>, ClientError> {
        let url = self.search_url(text);
        let response = self
            .client
            .get(url.clone())
            .header(header::ACCEPT_LANGUAGE, &self.options.accept_language)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let raw: Vec<RawPlace> =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: format!("geocoding search for \"{text}\""),
                source: e,
            })?;

        let places = raw
            .into_iter()
            .filter_map(|r| {
                let name = r.display_name.clone();
                let place = r.into_place();
                if place.is_none() {
                    tracing::warn!(place = %name, "skipping place with unusable coordinates");
                }
                place
            })
            .collect();
        Ok(places)
    }

    /// The free-text query sent for `text`.
    #[must_use]
    pub fn query_text(&self, text: &str) -> String {
        let locality = self.options.locality.trim();
        if locality.is_empty() {
            text.to_owned()
        } else {
            format!("{text} {locality}")
        }
    }

    fn search_url(&self, text: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("q", &self.query_text(text))
            .append_pair("addressdetails", "1")
            .append_pair("limit", &self.options.limit.to_string());
        url
    }
}
