use tracing::{debug, warn};

use crate::{
    DirectoryEventVariant, DirectoryEvents, FetchError, NavigationState, PageCache, UserRecord,
    UsersPage,
};

/// Identity of one issued page request.
///
/// Hand it back to [`DirectoryState::complete_load`] together with the request's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    page: u32,
    generation: u64,
}

impl LoadTicket {
    /// The page to request.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// The load this request belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The result of a [`DirectoryState`] transition.
#[derive(Debug)]
#[must_use = "the new state replaces the old one, and a returned ticket must be fetched"]
pub struct Transition {
    /// The state after the transition.
    pub state: DirectoryState,
    /// A request that must be issued, `None` when nothing changed or the page came from the cache.
    pub fetch: Option<LoadTicket>,
}

impl Transition {
    fn unchanged(state: DirectoryState) -> Self {
        Self { state, fetch: None }
    }
}

/// Everything the paged user directory knows, as one owned value.
///
/// Every update is a transition consuming the old state and producing the new one,
/// no I/O happens in here: a transition that needs the network hands back a [`LoadTicket`],
/// and the caller applies the outcome later with [`DirectoryState::complete_load`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryState {
    cache: PageCache,
    navigation: NavigationState,
    displayed: Vec<UserRecord>,
    generation: u64,
    events: DirectoryEvents,
}

impl DirectoryState {
    /// Page 1 of 1, nothing loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Step back a page and load it. No-op on the first page.
    pub fn go_to_previous_page(self) -> Transition {
        match self.navigation.previous() {
            Some(navigation) => {
                let page = navigation.current_page;
                Self { navigation, ..self }.load_page(page)
            }
            None => Transition::unchanged(self),
        }
    }

    /// Step forward a page and load it. No-op on the last known page.
    pub fn go_to_next_page(self) -> Transition {
        match self.navigation.next() {
            Some(navigation) => {
                let page = navigation.current_page;
                Self { navigation, ..self }.load_page(page)
            }
            None => Transition::unchanged(self),
        }
    }

    /// Show `page`, from the cache when possible, otherwise by requesting it.
    ///
    /// No bounds validation against the known page count: an out of range page is requested
    /// like any other and whatever the listing service answers is accepted.
    /// Page numbers start from 1, so 0 is treated as 1.
    pub fn load_page(mut self, page: u32) -> Transition {
        let page = page.max(1);
        self.generation += 1;
        self.navigation.current_page = page;
        self.navigation.is_loading = true;

        if let Some(records) = self.cache.get(page) {
            debug!(page, "serving page from cache");
            self.displayed = records.to_vec();
            self.navigation.is_loading = false;
            self.events.push(DirectoryEventVariant::CacheHit { page });
            Transition::unchanged(self)
        } else {
            debug!(page, generation = self.generation, "requesting page");
            self.events.push(DirectoryEventVariant::FetchStarted { page });
            let ticket = LoadTicket {
                page,
                generation: self.generation,
            };
            Transition {
                state: self,
                fetch: Some(ticket),
            }
        }
    }

    /// Apply the outcome of the request identified by `ticket`.
    ///
    /// A successful response replaces the displayed rows, the page count and the loading flag
    /// only when it belongs to the latest load, or when it's for the page currently waiting to be shown,
    /// and is then cached under its page. Any other response is cached only if its page isn't cached yet.
    /// Failures are logged and otherwise leave the display as it was.
    pub fn complete_load(mut self, ticket: LoadTicket, result: Result<UsersPage, FetchError>) -> Self {
        let is_latest = ticket.generation == self.generation;
        match result {
            Ok(users_page) => {
                let awaited = self.navigation.is_loading && ticket.page == self.navigation.current_page;
                if is_latest || awaited {
                    let elapsed_ms = self
                        .events
                        .last_fetch_started(ticket.page)
                        .map(|started| (chrono::Utc::now() - started).num_milliseconds())
                        .unwrap_or_default();
                    debug!(
                        page = ticket.page,
                        total_pages = users_page.total_pages,
                        records = users_page.records.len(),
                        elapsed_ms,
                        "page fetched"
                    );
                    self.navigation.total_pages = users_page.total_pages.max(1);
                    self.navigation.is_loading = false;
                    self.displayed = users_page.records.clone();
                    self.events.push(DirectoryEventVariant::Fetched {
                        page: ticket.page,
                        elapsed_ms,
                    });
                } else {
                    debug!(
                        page = ticket.page,
                        generation = ticket.generation,
                        current_generation = self.generation,
                        "stale response, caching without displaying"
                    );
                    self.events
                        .push(DirectoryEventVariant::StaleResponse { page: ticket.page });
                    // A later request for the same page may already have landed:
                    if self.cache.contains(ticket.page) {
                        return self;
                    }
                }
                self.cache.insert(ticket.page, users_page.records);
            }
            Err(err) => {
                warn!(page = ticket.page, error = %err, "failed to fetch users");
                if is_latest {
                    self.navigation.is_loading = false;
                }
                self.events
                    .push(DirectoryEventVariant::FetchFailed { page: ticket.page });
            }
        }
        self
    }

    /// Current page, page count and loading flag.
    pub fn navigation(&self) -> NavigationState {
        self.navigation
    }

    /// The page being shown, starting from 1.
    pub fn current_page(&self) -> u32 {
        self.navigation.current_page
    }

    /// Page count last reported by the listing service.
    pub fn total_pages(&self) -> u32 {
        self.navigation.total_pages
    }

    /// Whether the current page is waiting on the listing service.
    pub fn is_loading(&self) -> bool {
        self.navigation.is_loading
    }

    /// See [`NavigationState::can_go_previous`].
    pub fn can_go_previous(&self) -> bool {
        self.navigation.can_go_previous()
    }

    /// See [`NavigationState::can_go_next`].
    pub fn can_go_next(&self) -> bool {
        self.navigation.can_go_next()
    }

    /// The rows to render, `None` while loading.
    ///
    /// After a failed fetch these are whatever was displayed before, possibly nothing.
    pub fn rows(&self) -> Option<&[UserRecord]> {
        if self.navigation.is_loading {
            None
        } else {
            Some(&self.displayed)
        }
    }

    /// All pages fetched so far.
    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    /// Recent loading activity, oldest first.
    pub fn events(&self) -> &DirectoryEvents {
        &self.events
    }

    /// Incremented on every [`DirectoryState::load_page`].
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
