//! Monotonic tokens that decide which asynchronous result is authoritative.

use std::fmt;

/// Identifies one ranking session. Only the latest one may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionToken(u64);

/// Identifies one geocoding request. Only the latest one may fill the
/// suggestion box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryToken(u64);

impl SessionToken {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl QueryToken {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session#{}", self.0)
    }
}

impl fmt::Display for QueryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "query#{}", self.0)
    }
}

/// Issues increasing values and remembers the most recent one.
#[derive(Debug, Default)]
pub(crate) struct Sequence {
    latest: u64,
}

impl Sequence {
    pub(crate) fn next(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// `None` until the first value is issued.
    pub(crate) fn latest(&self) -> Option<u64> {
        (self.latest > 0).then_some(self.latest)
    }

    pub(crate) fn is_latest(&self, value: u64) -> bool {
        value == self.latest
    }

    pub(crate) fn next_session(&mut self) -> SessionToken {
        SessionToken(self.next())
    }

    pub(crate) fn next_query(&mut self) -> QueryToken {
        QueryToken(self.next())
    }

    pub(crate) fn latest_session(&self) -> Option<SessionToken> {
        self.latest().map(SessionToken)
    }
}
