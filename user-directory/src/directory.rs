use leptos::prelude::{ArcRwSignal, Update, With, expect_context, provide_context};

use crate::{
    DirectoryEvents, DirectoryState, LoadTicket, NavigationState, PageFetcher, Transition,
    UserRecord,
};

/// What the directory currently has to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rows {
    /// A fetch for the current page is in flight, render a loading indicator instead of rows.
    Loading,
    /// The rows for the current page, or the last rows successfully shown if its fetch failed.
    Ready(Vec<UserRecord>),
}

/// The paged user directory: a reactive [`DirectoryState`] plus the [`PageFetcher`] feeding it.
///
/// Navigation is fire-and-forget: a page that isn't cached is fetched on the UI event loop
/// via [`leptos::task::spawn_local`], and its result is applied whenever it arrives.
/// Failures are logged and never reach the caller.
///
/// Reads go through the underlying signal, so they're tracked when used inside reactive closures.
///
/// # Example
///
/// ```no_run
/// use leptos::prelude::*;
/// use user_directory::{DirectoryOptions, ListingClient, PagedUserDirectory, UserDirectoryTable};
///
/// #[component]
/// pub fn App() -> impl IntoView {
///     let directory = PagedUserDirectory::provide(
///         ListingClient::new(DirectoryOptions::default()).into_fetcher(),
///     );
///     view! { <UserDirectoryTable directory=directory /> }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PagedUserDirectory {
    state: ArcRwSignal<DirectoryState>,
    fetcher: PageFetcher,
}

impl PagedUserDirectory {
    /// Creates a new [`PagedUserDirectory`] on page 1 of 1, without requesting anything yet.
    pub fn new(fetcher: PageFetcher) -> Self {
        Self {
            state: ArcRwSignal::new(DirectoryState::new()),
            fetcher,
        }
    }

    /// Creates a new [`PagedUserDirectory`] and starts loading the first page.
    pub fn mount(fetcher: PageFetcher) -> Self {
        let directory = Self::new(fetcher);
        directory.load_page(1);
        directory
    }

    /// Mount a new [`PagedUserDirectory`] and provide it via leptos context.
    ///
    /// The directory can then be accessed with [`PagedUserDirectory::expect()`] from any child component.
    pub fn provide(fetcher: PageFetcher) -> Self {
        let directory = Self::mount(fetcher);
        provide_context(directory.clone());
        directory
    }

    /// Extract the [`PagedUserDirectory`] out of leptos context.
    ///
    /// # Panics
    ///
    /// Panics if the [`PagedUserDirectory`] has not been provided via leptos context by a parent component.
    #[track_caller]
    pub fn expect() -> Self {
        expect_context()
    }

    /// Go back a page, loading it. Silently does nothing on the first page.
    pub fn go_to_previous_page(&self) {
        self.transition(DirectoryState::go_to_previous_page);
    }

    /// Go forward a page, loading it. Silently does nothing on the last known page.
    pub fn go_to_next_page(&self) {
        self.transition(DirectoryState::go_to_next_page);
    }

    /// Show `page`, from the cache if it's been fetched before, otherwise by fetching it.
    ///
    /// Not bounds checked against [`PagedUserDirectory::total_pages`].
    pub fn load_page(&self, page: u32) {
        self.transition(|state| state.load_page(page));
    }

    fn transition(&self, transition: impl FnOnce(DirectoryState) -> Transition) {
        let ticket = self
            .state
            .try_maybe_update(|state| {
                let generation = state.generation();
                let Transition {
                    state: next,
                    fetch,
                } = transition(std::mem::take(state));
                *state = next;
                // No-op transitions don't notify subscribers:
                (state.generation() != generation, fetch)
            })
            .flatten();

        if let Some(ticket) = ticket {
            self.spawn_fetch(ticket);
        }
    }

    fn spawn_fetch(&self, ticket: LoadTicket) {
        let state = self.state.clone();
        let fetch = self.fetcher.fetch(ticket.page());
        leptos::task::spawn_local(async move {
            let result = fetch.await;
            state.update(|state| {
                *state = std::mem::take(state).complete_load(ticket, result);
            });
        });
    }

    /// The underlying reactive state.
    pub fn state(&self) -> ArcRwSignal<DirectoryState> {
        self.state.clone()
    }

    /// Current page, page count and loading flag.
    pub fn navigation(&self) -> NavigationState {
        self.state.with(DirectoryState::navigation)
    }

    /// The page being shown, starting from 1.
    pub fn current_page(&self) -> u32 {
        self.state.with(DirectoryState::current_page)
    }

    /// Page count last reported by the listing service, 1 until the first successful fetch.
    pub fn total_pages(&self) -> u32 {
        self.state.with(DirectoryState::total_pages)
    }

    /// Whether the current page is being fetched.
    pub fn is_loading(&self) -> bool {
        self.state.with(DirectoryState::is_loading)
    }

    /// Whether the previous page control should be enabled.
    pub fn can_go_previous(&self) -> bool {
        self.state.with(DirectoryState::can_go_previous)
    }

    /// Whether the next page control should be enabled.
    pub fn can_go_next(&self) -> bool {
        self.state.with(DirectoryState::can_go_next)
    }

    /// What to render for the current page.
    pub fn rows(&self) -> Rows {
        self.state.with(|state| match state.rows() {
            Some(rows) => Rows::Ready(rows.to_vec()),
            None => Rows::Loading,
        })
    }

    /// The cached records for `page`, if it has been fetched.
    pub fn cached_page(&self, page: u32) -> Option<Vec<UserRecord>> {
        self.state
            .with(|state| state.cache().get(page).map(<[UserRecord]>::to_vec))
    }

    /// Recent loading activity, oldest first.
    pub fn events(&self) -> DirectoryEvents {
        self.state.with(|state| state.events().clone())
    }
}
