use parkfinder_client::ClientError;
use thiserror::Error;

/// Collaborator failures surfaced by the widget.
///
/// Neither is retried. A lookup failure leaves the previous ranking on
/// screen; a geocode failure leaves the suggestion box as it was.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("facility lookup failed: {0}")]
    LookupFailure(#[source] ClientError),

    #[error("geocoding failed: {0}")]
    GeocodeFailure(#[source] ClientError),
}
