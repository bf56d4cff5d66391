//! Single-slot pending operation used to debounce search input.
//!
//! Arming cancels whatever was pending and sets a new deadline; firing
//! clears the slot before the caller acts on it. The timer future is handed
//! back to the caller to poll, so it runs on tokio's clock and can be driven
//! by a paused clock in tests.

use std::future::Future;
use std::time::Duration;

use futures::future::{AbortHandle, AbortRegistration, Abortable};
use tokio::time::Instant;

/// Default quiet period before a search is issued.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DebounceToken(u64);

#[derive(Debug)]
struct Pending {
    token: DebounceToken,
    abort: AbortHandle,
}

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: u64,
    pending: Option<Pending>,
}

/// A freshly armed timer. Poll [`Armed::elapsed`] to wait for it.
#[derive(Debug)]
pub struct Armed {
    pub token: DebounceToken,
    pub deadline: Instant,
    registration: AbortRegistration,
}

impl Armed {
    /// Resolves to the token once the deadline passes, or to `None` if the
    /// slot was re-armed or canceled first.
    pub fn elapsed(self) -> impl Future<Output = Option<DebounceToken>> + Send + 'static {
        let Armed {
            token,
            deadline,
            registration,
        } = self;
        async move {
            Abortable::new(tokio::time::sleep_until(deadline), registration)
                .await
                .ok()
                .map(|()| token)
        }
    }
}

impl Debouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancels any pending timer and arms a new one `delay` from now.
    pub fn arm(&mut self) -> Armed {
        self.cancel();
        self.generation += 1;
        let token = DebounceToken(self.generation);
        let (abort, registration) = AbortHandle::new_pair();
        self.pending = Some(Pending { token, abort });
        Armed {
            token,
            deadline: Instant::now() + self.delay,
            registration,
        }
    }

    /// Claims the slot for `token`. Returns `false` (and leaves the slot
    /// alone) unless `token` is the one currently armed, so a timer fires at
    /// most once.
    pub fn fire(&mut self, token: DebounceToken) -> bool {
        match &self.pending {
            Some(pending) if pending.token == token => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Aborts the pending timer, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.abort.abort();
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rearming_supersedes_previous_token() {
        let mut debouncer = Debouncer::default();
        let first = debouncer.arm();
        let second = debouncer.arm();
        assert!(!debouncer.fire(first.token));
        assert!(debouncer.is_armed());
        assert!(debouncer.fire(second.token));
        assert!(!debouncer.is_armed());
    }

    #[test]
    fn fires_at_most_once() {
        let mut debouncer = Debouncer::default();
        let armed = debouncer.arm();
        assert!(debouncer.fire(armed.token));
        assert!(!debouncer.fire(armed.token));
    }

    #[test]
    fn cancel_clears_slot() {
        let mut debouncer = Debouncer::default();
        let armed = debouncer.arm();
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());
        assert!(!debouncer.fire(armed.token));
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_timer_resolves_to_none() {
        let mut debouncer = Debouncer::default();
        let first = debouncer.arm();
        let second = debouncer.arm();
        assert_eq!(first.elapsed().await, None);
        let token = second.token;
        assert_eq!(second.elapsed().await, Some(token));
    }

    #[tokio::test(start_paused = true)]
    async fn timer_waits_for_full_delay() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        let start = Instant::now();
        let armed = debouncer.arm();
        armed.elapsed().await;
        assert!(start.elapsed() >= Duration::from_millis(500));
    }
}
