use core::fmt;
use std::{collections::VecDeque, ops::Deref};

/// How many events the directory remembers.
pub(crate) const EVENT_HISTORY: usize = 32;

/// Something that happened while loading pages, kept as a diagnostic trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirectoryEvent {
    /// When the event was recorded.
    pub recorded_at: chrono::DateTime<chrono::Utc>,
    /// What happened.
    pub variant: DirectoryEventVariant,
}

impl DirectoryEvent {
    pub(crate) fn new(variant: DirectoryEventVariant) -> Self {
        Self {
            recorded_at: chrono::Utc::now(),
            variant,
        }
    }
}

/// The kinds of [`DirectoryEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectoryEventVariant {
    /// The page was served from the cache, no request was made.
    CacheHit {
        /// The page served.
        page: u32,
    },
    /// A request for the page was issued.
    FetchStarted {
        /// The page requested.
        page: u32,
    },
    /// The page arrived and is now cached.
    Fetched {
        /// The page received.
        page: u32,
        /// Time between issuing the request and applying its result.
        elapsed_ms: i64,
    },
    /// The request for the page failed.
    FetchFailed {
        /// The page requested.
        page: u32,
    },
    /// A response arrived after the directory had moved on to another load.
    StaleResponse {
        /// The page the response was for.
        page: u32,
    },
}

impl fmt::Display for DirectoryEventVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryEventVariant::CacheHit { page } => write!(f, "page {} served from cache", page),
            DirectoryEventVariant::FetchStarted { page } => write!(f, "page {} requested", page),
            DirectoryEventVariant::Fetched { page, elapsed_ms } => {
                write!(f, "page {} fetched in {}ms", page, elapsed_ms)
            }
            DirectoryEventVariant::FetchFailed { page } => write!(f, "page {} failed to load", page),
            DirectoryEventVariant::StaleResponse { page } => {
                write!(f, "stale response for page {}", page)
            }
        }
    }
}

/// Bounded history of [`DirectoryEvent`]s, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryEvents {
    events: VecDeque<DirectoryEvent>,
}

impl Deref for DirectoryEvents {
    type Target = VecDeque<DirectoryEvent>;

    fn deref(&self) -> &Self::Target {
        &self.events
    }
}

impl DirectoryEvents {
    pub(crate) fn push(&mut self, variant: DirectoryEventVariant) {
        if self.events.len() == EVENT_HISTORY {
            self.events.pop_front();
        }
        self.events.push_back(DirectoryEvent::new(variant));
    }

    /// The recorded variants, oldest first.
    pub fn variants(&self) -> impl Iterator<Item = DirectoryEventVariant> + '_ {
        self.events.iter().map(|event| event.variant)
    }

    /// When a request for `page` was last issued, if it's still in the history.
    pub(crate) fn last_fetch_started(&self, page: u32) -> Option<chrono::DateTime<chrono::Utc>> {
        self.events
            .iter()
            .rev()
            .find(|event| event.variant == DirectoryEventVariant::FetchStarted { page })
            .map(|event| event.recorded_at)
    }
}
