//! Ranking sessions: fetch facilities for a location, then render them if
//! no newer session has started in the meantime.

use std::sync::Arc;

use futures::future::BoxFuture;
use parkfinder_client::ClientError;
use parkfinder_core::{Facility, QueryLocation};

use crate::collaborators::FacilityLookup;
use crate::error::WidgetError;
use crate::render::{FacilityListItem, FacilityRenderer};
use crate::surface::{ListContainer, MapSurface};
use crate::token::{Sequence, SessionToken};

/// Pending lookup response for one session.
pub type LookupFuture = BoxFuture<'static, Result<Vec<Facility>, ClientError>>;

#[derive(Debug)]
pub enum SessionOutcome {
    /// The session's facilities are now on screen (`count` may be zero).
    Rendered {
        token: SessionToken,
        location: QueryLocation,
        count: usize,
    },
    /// The lookup failed; the previous rendering is still shown.
    Failed {
        token: SessionToken,
        error: WidgetError,
    },
    /// A newer session superseded this one; its response was dropped.
    Stale { token: SessionToken },
}

pub struct SessionController {
    lookup: Arc<dyn FacilityLookup>,
    sessions: Sequence,
}

impl SessionController {
    pub fn new(lookup: Arc<dyn FacilityLookup>) -> Self {
        Self {
            lookup,
            sessions: Sequence::default(),
        }
    }

    /// Starts a session for `location` and issues its lookup request.
    ///
    /// The returned token supersedes every earlier one.
    pub fn start(&mut self, location: QueryLocation) -> (SessionToken, LookupFuture) {
        let token = self.sessions.next_session();
        tracing::debug!(%token, %location, "starting ranking session");
        (token, self.lookup.lookup(location))
    }

    #[must_use]
    pub fn latest(&self) -> Option<SessionToken> {
        self.sessions.latest_session()
    }

    #[must_use]
    pub fn is_current(&self, token: SessionToken) -> bool {
        self.sessions.is_latest(token.get())
    }

    /// Applies the lookup response of session `token`.
    ///
    /// Responses of superseded sessions are dropped whatever they contain.
    pub fn complete<M, L>(
        &self,
        token: SessionToken,
        location: QueryLocation,
        result: Result<Vec<Facility>, ClientError>,
        renderer: &mut FacilityRenderer,
        map: &mut M,
        list: &mut L,
    ) -> SessionOutcome
    where
        M: MapSurface + ?Sized,
        L: ListContainer<FacilityListItem> + ?Sized,
    {
        if !self.is_current(token) {
            tracing::debug!(%token, "discarding response of superseded session");
            return SessionOutcome::Stale { token };
        }

        match result {
            Ok(facilities) => {
                let count = renderer.render(map, list, location, facilities);
                tracing::info!(%token, %location, count, "ranking session rendered");
                SessionOutcome::Rendered {
                    token,
                    location,
                    count,
                }
            }
            Err(e) => {
                tracing::warn!(%token, %location, error = %e, "facility lookup failed");
                SessionOutcome::Failed {
                    token,
                    error: WidgetError::LookupFailure(e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;
    use crate::memory::{InMemoryList, InMemoryMap};

    #[derive(Default)]
    struct RecordingLookup {
        calls: Mutex<Vec<QueryLocation>>,
        count: AtomicUsize,
    }

    impl FacilityLookup for RecordingLookup {
        fn lookup(
            &self,
            location: QueryLocation,
        ) -> BoxFuture<'static, Result<Vec<Facility>, ClientError>> {
            self.calls.lock().unwrap().push(location);
            let n = self.count.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move {
                Ok((0..=n)
                    .map(|i| Facility {
                        name: format!("P{i}"),
                        latitude: location.latitude,
                        longitude: location.longitude,
                        free_spaces: 5,
                        capacity: 10,
                        distance_km: 0.1,
                        price_per_hour: 1.0,
                    })
                    .collect())
            })
        }
    }

    fn at(latitude: f64, longitude: f64) -> QueryLocation {
        QueryLocation {
            latitude,
            longitude,
        }
    }

    #[tokio::test]
    async fn start_issues_one_lookup_for_location() {
        let lookup = Arc::new(RecordingLookup::default());
        let mut sessions = SessionController::new(lookup.clone());

        let (token, response) = sessions.start(at(51.5, 7.4));
        assert_eq!(sessions.latest(), Some(token));
        let facilities = response.await.unwrap();

        assert_eq!(facilities.len(), 1);
        assert_eq!(*lookup.calls.lock().unwrap(), vec![at(51.5, 7.4)]);
    }

    #[tokio::test]
    async fn stale_response_is_not_rendered() {
        let lookup = Arc::new(RecordingLookup::default());
        let mut sessions = SessionController::new(lookup);
        let mut renderer = FacilityRenderer::default();
        let mut map = InMemoryMap::new();
        let mut list = InMemoryList::new();

        let (old_token, old_response) = sessions.start(at(51.0, 7.0));
        let (new_token, new_response) = sessions.start(at(52.0, 8.0));

        // The newer session answers first.
        let outcome = sessions.complete(
            new_token,
            at(52.0, 8.0),
            new_response.await,
            &mut renderer,
            &mut map,
            &mut list,
        );
        assert!(matches!(outcome, SessionOutcome::Rendered { count: 2, .. }));

        let outcome = sessions.complete(
            old_token,
            at(51.0, 7.0),
            old_response.await,
            &mut renderer,
            &mut map,
            &mut list,
        );
        assert!(matches!(outcome, SessionOutcome::Stale { token } if token == old_token));
        assert_eq!(map.marker_count(), 2);
        assert_eq!(list.len(), 2);
        assert_eq!(renderer.origin(), Some(at(52.0, 8.0)));
    }

    #[test]
    fn failure_keeps_previous_rendering() {
        let lookup = Arc::new(RecordingLookup::default());
        let mut sessions = SessionController::new(lookup);
        let mut renderer = FacilityRenderer::default();
        let mut map = InMemoryMap::new();
        let mut list = InMemoryList::new();

        let (first, _) = sessions.start(at(51.0, 7.0));
        let facility = Facility {
            name: "Kept".to_owned(),
            latitude: 51.0,
            longitude: 7.0,
            free_spaces: 1,
            capacity: 1,
            distance_km: 0.0,
            price_per_hour: 1.0,
        };
        sessions.complete(
            first,
            at(51.0, 7.0),
            Ok(vec![facility]),
            &mut renderer,
            &mut map,
            &mut list,
        );

        let (second, _) = sessions.start(at(52.0, 8.0));
        let outcome = sessions.complete(
            second,
            at(52.0, 8.0),
            Err(ClientError::UnexpectedStatus {
                status: 502,
                url: "http://lookup/api/parkings".to_owned(),
            }),
            &mut renderer,
            &mut map,
            &mut list,
        );

        assert!(matches!(
            outcome,
            SessionOutcome::Failed {
                error: WidgetError::LookupFailure(_),
                ..
            }
        ));
        assert_eq!(map.marker_count(), 1);
        assert_eq!(renderer.entries()[0].facility.name, "Kept");
    }
}
