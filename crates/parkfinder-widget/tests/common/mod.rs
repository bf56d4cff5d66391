//! Fake collaborators and fixtures shared by the widget integration tests.
//!
//! The fakes record every request when it is issued and hold the response
//! until the test releases it, so completions can be forced out of order.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use futures::FutureExt;
use parkfinder_client::{ClientError, Place};
use parkfinder_core::{Facility, QueryLocation};
use parkfinder_widget::{
    FacilityListItem, FacilityLookup, Geocoder, InMemoryInput, InMemoryList, InMemoryMap,
    ParkingWidget, SuggestionListItem, Surfaces, WidgetSettings,
};
use tokio::sync::oneshot;
use tokio::time::Instant;

pub type TestWidget = ParkingWidget<
    InMemoryMap,
    InMemoryList<FacilityListItem>,
    InMemoryList<SuggestionListItem>,
    InMemoryInput,
>;

type Reply<T> = oneshot::Sender<Result<T, ClientError>>;

struct Call<Req, T> {
    request: Req,
    at: Instant,
    reply: Option<Reply<T>>,
}

/// A collaborator whose responses are released by the test.
pub struct Gated<Req, T> {
    calls: Mutex<Vec<Call<Req, T>>>,
}

pub type GatedLookup = Gated<QueryLocation, Vec<Facility>>;
pub type GatedGeocoder = Gated<String, Vec<Place>>;

impl<Req: Clone, T: Send + 'static> Gated<Req, T> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
        })
    }

    fn register(&self, request: Req) -> BoxFuture<'static, Result<T, ClientError>> {
        let (tx, rx) = oneshot::channel();
        self.calls.lock().unwrap().push(Call {
            request,
            at: Instant::now(),
            reply: Some(tx),
        });
        async move { rx.await.unwrap_or_else(|_| Err(unavailable())) }.boxed()
    }

    pub fn requests(&self) -> Vec<Req> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.request.clone())
            .collect()
    }

    /// When each request was issued, on tokio's clock.
    pub fn issued_at(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|c| c.at).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Releases the response of the `index`-th request (0-based).
    pub fn reply(&self, index: usize, result: Result<T, ClientError>) {
        let tx = self.calls.lock().unwrap()[index]
            .reply
            .take()
            .expect("request already answered");
        // The widget may have dropped the receiver; that is fine.
        let _ = tx.send(result);
    }
}

impl FacilityLookup for GatedLookup {
    fn lookup(
        &self,
        location: QueryLocation,
    ) -> BoxFuture<'static, Result<Vec<Facility>, ClientError>> {
        self.register(location)
    }
}

impl Geocoder for GatedGeocoder {
    fn search(&self, text: &str) -> BoxFuture<'static, Result<Vec<Place>, ClientError>> {
        self.register(text.to_owned())
    }
}

pub fn unavailable() -> ClientError {
    ClientError::UnexpectedStatus {
        status: 503,
        url: "http://127.0.0.1:5000/api/parkings".to_owned(),
    }
}

pub fn widget(lookup: &Arc<GatedLookup>, geocoder: &Arc<GatedGeocoder>) -> TestWidget {
    ParkingWidget::new(
        Surfaces::default(),
        lookup.clone(),
        geocoder.clone(),
        WidgetSettings::default(),
    )
}

pub fn location(latitude: f64, longitude: f64) -> QueryLocation {
    QueryLocation {
        latitude,
        longitude,
    }
}

pub fn facility(name: &str, free_spaces: u32, capacity: u32) -> Facility {
    Facility {
        name: name.to_owned(),
        latitude: 51.51,
        longitude: 7.46,
        free_spaces,
        capacity,
        distance_km: 0.3,
        price_per_hour: 1.5,
    }
}

pub fn place(label: &str, latitude: f64, longitude: f64) -> Place {
    Place {
        label: label.to_owned(),
        location: location(latitude, longitude),
    }
}

/// Labels currently shown in the suggestion box.
pub fn suggestion_texts(widget: &TestWidget) -> Vec<String> {
    widget
        .surfaces()
        .suggestions
        .items()
        .iter()
        .map(|(_, item)| item.to_string())
        .collect()
}

/// Names of the facilities currently listed, in display order.
pub fn listed_names(widget: &TestWidget) -> Vec<String> {
    widget
        .surfaces()
        .facilities
        .items()
        .iter()
        .filter_map(|(_, item)| match item {
            FacilityListItem::Entry(summary) => Some(summary.name.clone()),
            FacilityListItem::NoResults => None,
        })
        .collect()
}
