//! Seams to the remote services the widget depends on.
//!
//! Both traits hand back owned futures: the request is issued when the
//! method is called and may complete after newer requests, which is why the
//! widget tags every response with a token.

use futures::future::BoxFuture;
use parkfinder_client::{ClientError, FacilityClient, GeocodeClient, Place};
use parkfinder_core::{Facility, QueryLocation};

/// Looks up facilities around a location, best first.
pub trait FacilityLookup: Send + Sync {
    fn lookup(&self, location: QueryLocation)
        -> BoxFuture<'static, Result<Vec<Facility>, ClientError>>;
}

/// Resolves free text to candidate destinations.
pub trait Geocoder: Send + Sync {
    fn search(&self, text: &str) -> BoxFuture<'static, Result<Vec<Place>, ClientError>>;
}

impl FacilityLookup for FacilityClient {
    fn lookup(
        &self,
        location: QueryLocation,
    ) -> BoxFuture<'static, Result<Vec<Facility>, ClientError>> {
        let client = self.clone();
        Box::pin(async move { client.fetch_facilities(location).await })
    }
}

impl Geocoder for GeocodeClient {
    fn search(&self, text: &str) -> BoxFuture<'static, Result<Vec<Place>, ClientError>> {
        let client = self.clone();
        let text = text.to_owned();
        Box::pin(async move { GeocodeClient::search(&client, &text).await })
    }
}
