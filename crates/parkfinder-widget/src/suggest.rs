//! Destination search: debounced input, geocoding, and the suggestion box.
//!
//! Lifecycle: `Idle -> Debouncing -> Querying -> Displaying`, back to `Idle`
//! when the box is cleared or a suggestion is picked. Timer and response
//! completions are fed back in by the widget together with the token they
//! were issued under; anything superseded is ignored.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use parkfinder_client::{ClientError, Place};
use parkfinder_core::QueryLocation;

use crate::collaborators::Geocoder;
use crate::debounce::{Armed, DebounceToken, Debouncer};
use crate::error::WidgetError;
use crate::surface::{ItemId, ListContainer, MapSurface, MarkerIcon, MarkerId, Popup, TextInput};
use crate::token::{QueryToken, Sequence};

pub const NO_PLACES_TEXT: &str = "No results found";

/// Pending geocoding response for one query.
pub type SearchFuture = BoxFuture<'static, Result<Vec<Place>, ClientError>>;

#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionListItem {
    Place { label: String },
    /// Sole entry when the geocoder found nothing.
    NoResults,
}

impl fmt::Display for SuggestionListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuggestionListItem::Place { label } => f.write_str(label),
            SuggestionListItem::NoResults => f.write_str(NO_PLACES_TEXT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Debouncing,
    Querying,
    Displaying,
}

/// A place shown in the suggestion box and the entry it was drawn as.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionEntry {
    pub item: ItemId,
    pub place: Place,
}

/// The destination a user picked.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub label: String,
    pub location: QueryLocation,
}

/// What to do after the debounce timer fired.
pub enum DebounceResult {
    /// The timer was superseded or canceled.
    Ignored,
    /// Input too short: suggestions cleared, nothing requested.
    Cleared,
    /// A geocoding request was issued.
    Query {
        token: QueryToken,
        response: SearchFuture,
    },
}

#[derive(Debug)]
pub enum SuggestionOutcome {
    Cleared,
    Shown {
        token: QueryToken,
        count: usize,
    },
    /// The box is left as it was.
    Failed {
        token: QueryToken,
        error: WidgetError,
    },
    Stale {
        token: QueryToken,
    },
}

pub struct SuggestionController {
    geocoder: Arc<dyn Geocoder>,
    debouncer: Debouncer,
    queries: Sequence,
    pending_text: String,
    entries: Vec<SuggestionEntry>,
    /// The box currently shows results or the placeholder.
    showing: bool,
    state: SearchState,
    min_query_chars: usize,
    destination_zoom: u8,
    destination: Option<MarkerId>,
}

impl SuggestionController {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        debouncer: Debouncer,
        min_query_chars: usize,
        destination_zoom: u8,
    ) -> Self {
        Self {
            geocoder,
            debouncer,
            queries: Sequence::default(),
            pending_text: String::new(),
            entries: Vec::new(),
            showing: false,
            state: SearchState::Idle,
            min_query_chars,
            destination_zoom,
            destination: None,
        }
    }

    /// Records the new input text and re-arms the debounce timer.
    pub fn input_changed(&mut self, text: &str) -> Armed {
        text.clone_into(&mut self.pending_text);
        self.state = SearchState::Debouncing;
        self.debouncer.arm()
    }

    /// Handles a fired debounce timer.
    pub fn debounce_elapsed<S>(&mut self, token: DebounceToken, list: &mut S) -> DebounceResult
    where
        S: ListContainer<SuggestionListItem> + ?Sized,
    {
        if !self.debouncer.fire(token) {
            return DebounceResult::Ignored;
        }

        let length = self.pending_text.trim().chars().count();
        if length < self.min_query_chars {
            // Whatever is still in flight belongs to older text.
            self.queries.next();
            self.clear(list);
            self.state = SearchState::Idle;
            tracing::debug!(length, "search input too short, suggestions cleared");
            return DebounceResult::Cleared;
        }

        let token = self.queries.next_query();
        self.state = SearchState::Querying;
        let text = self.pending_text.trim();
        tracing::debug!(%token, query = text, "searching destinations");
        let response = self.geocoder.search(text);
        DebounceResult::Query { token, response }
    }

    /// Applies the geocoding response of query `token`.
    pub fn suggestions_received<S>(
        &mut self,
        token: QueryToken,
        result: Result<Vec<Place>, ClientError>,
        list: &mut S,
    ) -> SuggestionOutcome
    where
        S: ListContainer<SuggestionListItem> + ?Sized,
    {
        if !self.queries.is_latest(token.get()) {
            tracing::debug!(%token, "discarding superseded suggestions");
            return SuggestionOutcome::Stale { token };
        }

        let outcome = match result {
            Ok(places) => {
                self.clear(list);
                let count = places.len();
                if places.is_empty() {
                    list.append(SuggestionListItem::NoResults);
                } else {
                    for place in places {
                        let item = list.append(SuggestionListItem::Place {
                            label: place.label.clone(),
                        });
                        self.entries.push(SuggestionEntry { item, place });
                    }
                }
                self.showing = true;
                SuggestionOutcome::Shown { token, count }
            }
            Err(e) => {
                tracing::warn!(%token, error = %e, "destination search failed");
                SuggestionOutcome::Failed {
                    token,
                    error: WidgetError::GeocodeFailure(e),
                }
            }
        };
        self.settle_state();
        outcome
    }

    /// Picks the suggestion drawn as `item`.
    ///
    /// Clears the box, writes the label into the input, moves the
    /// destination marker and re-centers the map. The caller starts the
    /// ranking session for the returned location. Unknown ids (including the
    /// placeholder) return `None` and change nothing.
    pub fn select<M, S, I>(
        &mut self,
        item: ItemId,
        map: &mut M,
        list: &mut S,
        input: &mut I,
    ) -> Option<Selection>
    where
        M: MapSurface + ?Sized,
        S: ListContainer<SuggestionListItem> + ?Sized,
        I: TextInput + ?Sized,
    {
        let index = self.entries.iter().position(|e| e.item == item)?;
        let place = self.entries.swap_remove(index).place;

        self.clear(list);
        self.debouncer.cancel();
        self.queries.next();
        self.state = SearchState::Idle;

        input.set_text(&place.label);
        place.label.clone_into(&mut self.pending_text);

        if let Some(previous) = self.destination.take() {
            map.remove_marker(previous);
        }
        let marker = map.add_marker(place.location, MarkerIcon::Destination);
        map.bind_popup(marker, Popup::Text(format!("Destination: {}", place.label)));
        map.open_popup(marker);
        self.destination = Some(marker);
        map.set_view(place.location, self.destination_zoom);

        tracing::info!(destination = %place.label, location = %place.location, "destination selected");
        Some(Selection {
            label: place.label,
            location: place.location,
        })
    }

    #[must_use]
    pub fn state(&self) -> SearchState {
        self.state
    }

    #[must_use]
    pub fn entries(&self) -> &[SuggestionEntry] {
        &self.entries
    }

    #[must_use]
    pub fn destination_marker(&self) -> Option<MarkerId> {
        self.destination
    }

    fn clear<S>(&mut self, list: &mut S)
    where
        S: ListContainer<SuggestionListItem> + ?Sized,
    {
        list.clear();
        self.entries.clear();
        self.showing = false;
    }

    fn settle_state(&mut self) {
        self.state = if self.debouncer.is_armed() {
            SearchState::Debouncing
        } else if self.showing {
            SearchState::Displaying
        } else {
            SearchState::Idle
        };
    }
}
