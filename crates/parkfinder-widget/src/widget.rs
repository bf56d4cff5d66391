//! The widget: surfaces, controllers, and the loop that drives them.
//!
//! Every piece of asynchronous work (debounce timers, facility lookups,
//! geocoding requests) is pushed into one `FuturesUnordered` as a
//! [`Completion`]. The task polling the widget resolves completions one at a
//! time and applies them synchronously, so surfaces are never touched
//! concurrently and need no locking.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use parkfinder_client::{ClientError, Place};
use parkfinder_core::{Facility, QueryLocation};
use tokio::sync::mpsc;

use crate::collaborators::{FacilityLookup, Geocoder};
use crate::debounce::{DebounceToken, Debouncer};
use crate::render::{FacilityListItem, FacilityRenderer};
use crate::session::{SessionController, SessionOutcome};
use crate::settings::WidgetSettings;
use crate::suggest::{
    DebounceResult, SearchState, Selection, SuggestionController, SuggestionListItem,
    SuggestionOutcome,
};
use crate::surface::{ItemId, ListContainer, MapSurface, MarkerIcon, MarkerId, Popup, TextInput};
use crate::token::{QueryToken, SessionToken};

/// Everything the widget draws on.
#[derive(Debug, Default)]
pub struct Surfaces<M, F, S, I> {
    pub map: M,
    pub facilities: F,
    pub suggestions: S,
    pub input: I,
}

/// User interaction fed into the widget.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// The search input now reads this text.
    SearchInput(String),
    SuggestionActivated(ItemId),
    FacilityActivated(ItemId),
    /// Re-center on a location and rank facilities around it.
    Locate(QueryLocation),
}

/// What handling an event or a completion changed.
#[derive(Debug)]
pub enum Outcome {
    SessionStarted {
        token: SessionToken,
        location: QueryLocation,
    },
    Session(SessionOutcome),
    QueryStarted {
        token: QueryToken,
    },
    Suggestions(SuggestionOutcome),
    DestinationSelected {
        selection: Selection,
        session: SessionToken,
    },
    FacilityFocused {
        item: ItemId,
        name: String,
        location: QueryLocation,
    },
}

enum Completion {
    Debounce(DebounceToken),
    Lookup {
        token: SessionToken,
        location: QueryLocation,
        result: Result<Vec<Facility>, ClientError>,
    },
    Geocode {
        token: QueryToken,
        result: Result<Vec<Place>, ClientError>,
    },
}

/// `None` marks work that ended without anything to apply (an aborted timer).
type InFlight = FuturesUnordered<BoxFuture<'static, Option<Completion>>>;

pub struct ParkingWidget<M, F, S, I> {
    surfaces: Surfaces<M, F, S, I>,
    settings: WidgetSettings,
    renderer: FacilityRenderer,
    sessions: SessionController,
    search: SuggestionController,
    origin_marker: Option<MarkerId>,
    in_flight: InFlight,
}

impl<M, F, S, I> ParkingWidget<M, F, S, I>
where
    M: MapSurface,
    F: ListContainer<FacilityListItem>,
    S: ListContainer<SuggestionListItem>,
    I: TextInput,
{
    pub fn new(
        surfaces: Surfaces<M, F, S, I>,
        lookup: Arc<dyn FacilityLookup>,
        geocoder: Arc<dyn Geocoder>,
        settings: WidgetSettings,
    ) -> Self {
        let search = SuggestionController::new(
            geocoder,
            Debouncer::new(settings.search_debounce),
            settings.min_query_chars,
            settings.destination_zoom,
        );
        Self {
            surfaces,
            renderer: FacilityRenderer::new(settings.focus_zoom),
            sessions: SessionController::new(lookup),
            search,
            origin_marker: None,
            in_flight: FuturesUnordered::new(),
            settings,
        }
    }

    /// Shows the default location and starts the first ranking session.
    pub fn start(&mut self) -> SessionToken {
        let location = self.settings.default_location;
        let map = &mut self.surfaces.map;
        map.set_view(location, self.settings.initial_zoom);

        if let Some(previous) = self.origin_marker.take() {
            map.remove_marker(previous);
        }
        let marker = map.add_marker(location, MarkerIcon::Origin);
        map.bind_popup(
            marker,
            Popup::Text(format!("Default location: {}", self.settings.default_label)),
        );
        map.open_popup(marker);
        self.origin_marker = Some(marker);

        self.load_facilities(location)
    }

    /// Starts a ranking session for `location`, superseding any earlier one.
    pub fn load_facilities(&mut self, location: QueryLocation) -> SessionToken {
        let (token, response) = self.sessions.start(location);
        self.in_flight.push(
            async move {
                Some(Completion::Lookup {
                    token,
                    location,
                    result: response.await,
                })
            }
            .boxed(),
        );
        token
    }

    /// Applies one user interaction. Work it starts completes through
    /// [`next_outcome`](Self::next_outcome) or [`run`](Self::run).
    pub fn handle(&mut self, event: UiEvent) -> Option<Outcome> {
        match event {
            UiEvent::SearchInput(text) => {
                let armed = self.search.input_changed(&text);
                tracing::debug!(token = ?armed.token, "search debounce armed");
                self.in_flight
                    .push(armed.elapsed().map(|fired| fired.map(Completion::Debounce)).boxed());
                None
            }
            UiEvent::SuggestionActivated(item) => {
                let selection = self.search.select(
                    item,
                    &mut self.surfaces.map,
                    &mut self.surfaces.suggestions,
                    &mut self.surfaces.input,
                )?;
                let session = self.load_facilities(selection.location);
                Some(Outcome::DestinationSelected { selection, session })
            }
            UiEvent::FacilityActivated(item) => {
                let entry = self.renderer.activate(&mut self.surfaces.map, item)?;
                Some(Outcome::FacilityFocused {
                    item,
                    name: entry.facility.name.clone(),
                    location: entry.facility.location(),
                })
            }
            UiEvent::Locate(location) => {
                self.surfaces
                    .map
                    .set_view(location, self.settings.initial_zoom);
                let token = self.load_facilities(location);
                Some(Outcome::SessionStarted { token, location })
            }
        }
    }

    /// Waits for the next in-flight completion that changes something.
    ///
    /// Returns `None` once nothing is in flight.
    pub async fn next_outcome(&mut self) -> Option<Outcome> {
        while let Some(completion) = self.in_flight.next().await {
            if let Some(outcome) = completion.and_then(|c| self.apply(c)) {
                return Some(outcome);
            }
        }
        None
    }

    /// Drives the widget from `events` until the channel closes and all
    /// in-flight work has completed.
    ///
    /// Every outcome is logged and, if `observer` is given, forwarded to it.
    pub async fn run(
        &mut self,
        mut events: mpsc::Receiver<UiEvent>,
        observer: Option<mpsc::UnboundedSender<Outcome>>,
    ) {
        let mut events_open = true;
        loop {
            let outcome = tokio::select! {
                event = events.recv(), if events_open => match event {
                    Some(event) => self.handle(event),
                    None => {
                        tracing::debug!("event channel closed, draining in-flight work");
                        events_open = false;
                        None
                    }
                },
                Some(completion) = self.in_flight.next(), if !self.in_flight.is_empty() => {
                    completion.and_then(|c| self.apply(c))
                }
                else => break,
            };

            let Some(outcome) = outcome else { continue };
            log_outcome(&outcome);
            if let Some(tx) = &observer {
                if tx.send(outcome).is_err() {
                    tracing::debug!("outcome observer dropped");
                }
            }
        }
    }

    #[must_use]
    pub fn surfaces(&self) -> &Surfaces<M, F, S, I> {
        &self.surfaces
    }

    #[must_use]
    pub fn renderer(&self) -> &FacilityRenderer {
        &self.renderer
    }

    #[must_use]
    pub fn suggestions(&self) -> &SuggestionController {
        &self.search
    }

    #[must_use]
    pub fn search_state(&self) -> SearchState {
        self.search.state()
    }

    #[must_use]
    pub fn latest_session(&self) -> Option<SessionToken> {
        self.sessions.latest()
    }

    #[must_use]
    pub fn origin_marker(&self) -> Option<MarkerId> {
        self.origin_marker
    }

    /// Number of timers and requests not yet resolved.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn into_surfaces(self) -> Surfaces<M, F, S, I> {
        self.surfaces
    }

    fn apply(&mut self, completion: Completion) -> Option<Outcome> {
        match completion {
            Completion::Debounce(token) => {
                match self
                    .search
                    .debounce_elapsed(token, &mut self.surfaces.suggestions)
                {
                    DebounceResult::Ignored => None,
                    DebounceResult::Cleared => Some(Outcome::Suggestions(SuggestionOutcome::Cleared)),
                    DebounceResult::Query { token, response } => {
                        self.in_flight.push(
                            async move {
                                Some(Completion::Geocode {
                                    token,
                                    result: response.await,
                                })
                            }
                            .boxed(),
                        );
                        Some(Outcome::QueryStarted { token })
                    }
                }
            }
            Completion::Lookup {
                token,
                location,
                result,
            } => Some(Outcome::Session(self.sessions.complete(
                token,
                location,
                result,
                &mut self.renderer,
                &mut self.surfaces.map,
                &mut self.surfaces.facilities,
            ))),
            Completion::Geocode { token, result } => Some(Outcome::Suggestions(
                self.search
                    .suggestions_received(token, result, &mut self.surfaces.suggestions),
            )),
        }
    }
}

fn log_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::SessionStarted { token, location } => {
            tracing::info!(%token, %location, "ranking session started");
        }
        Outcome::Session(SessionOutcome::Rendered { token, count, .. }) => {
            tracing::debug!(%token, count, "session outcome: rendered");
        }
        Outcome::Session(SessionOutcome::Failed { token, error }) => {
            tracing::debug!(%token, %error, "session outcome: failed");
        }
        Outcome::Session(SessionOutcome::Stale { token }) => {
            tracing::debug!(%token, "session outcome: stale");
        }
        Outcome::QueryStarted { token } => tracing::debug!(%token, "destination query started"),
        Outcome::Suggestions(SuggestionOutcome::Shown { token, count }) => {
            tracing::info!(%token, count, "suggestions shown");
        }
        Outcome::Suggestions(SuggestionOutcome::Failed { token, error }) => {
            tracing::debug!(%token, %error, "suggestions outcome: failed");
        }
        Outcome::Suggestions(SuggestionOutcome::Stale { token }) => {
            tracing::debug!(%token, "suggestions outcome: stale");
        }
        Outcome::Suggestions(SuggestionOutcome::Cleared) => tracing::debug!("suggestions cleared"),
        Outcome::DestinationSelected { selection, session } => {
            tracing::info!(destination = %selection.label, %session, "destination session started");
        }
        Outcome::FacilityFocused { name, .. } => tracing::debug!(facility = %name, "facility focused"),
    }
}
