#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

mod calculator;
mod directory;
mod directory_options;
mod directory_state;
mod error;
mod events;
mod listing_client;
mod navigation;
mod page_cache;
mod page_fetcher;
mod user_record;
mod view;

pub use calculator::*;
pub use directory::*;
pub use directory_options::*;
pub use directory_state::*;
pub use error::*;
pub use events::*;
pub use listing_client::*;
pub use navigation::*;
pub use page_cache::*;
pub use page_fetcher::*;
pub use user_record::*;
pub use view::*;

#[cfg(test)]
mod test {
    use std::{collections::HashSet, sync::Arc, time::Duration};

    use any_spawner::Executor;
    use leptos::prelude::*;
    use parking_lot::Mutex;
    use rstest::*;

    use super::*;

    macro_rules! prep {
        () => {{
            _ = Executor::init_tokio();
            let owner = Owner::new();
            owner.set();
            owner
        }};
    }

    macro_rules! tick {
        () => {
            Executor::tick().await;
        };
    }

    /// Wait long enough for every in-flight mock request to resolve and be applied.
    macro_rules! settle {
        () => {
            tokio::time::sleep(Duration::from_millis(SLOW_FETCHER_MS * 2)).await;
            tick!();
        };
    }

    const DEFAULT_FETCHER_MS: u64 = 30;
    const SLOW_FETCHER_MS: u64 = 120;

    fn user(id: u64) -> UserRecord {
        UserRecord {
            id,
            email: format!("user{id}@reqres.in"),
            first_name: format!("First{id}"),
            last_name: format!("Last{id}"),
            avatar_url: format!("https://reqres.in/img/faces/{id}-image.jpg"),
        }
    }

    fn page_records(page: u32) -> Vec<UserRecord> {
        let first = u64::from(page - 1) * 2 + 1;
        vec![user(first), user(first + 1)]
    }

    /// An in-memory listing service recording every page requested.
    #[derive(Clone)]
    struct MockListing {
        total_pages: Arc<Mutex<u32>>,
        requested: Arc<Mutex<Vec<u32>>>,
        failing: Arc<Mutex<HashSet<u32>>>,
        slow: Arc<Mutex<HashSet<u32>>>,
    }

    impl MockListing {
        fn new(total_pages: u32) -> Self {
            Self {
                total_pages: Arc::new(Mutex::new(total_pages)),
                requested: Arc::new(Mutex::new(vec![])),
                failing: Arc::new(Mutex::new(HashSet::new())),
                slow: Arc::new(Mutex::new(HashSet::new())),
            }
        }

        fn requested(&self) -> Vec<u32> {
            self.requested.lock().clone()
        }

        fn fetcher(&self) -> PageFetcher {
            let listing = self.clone();
            PageFetcher::new(move |page| {
                listing.requested.lock().push(page);
                let total_pages = *listing.total_pages.lock();
                let fails = listing.failing.lock().contains(&page);
                let delay = if listing.slow.lock().contains(&page) {
                    SLOW_FETCHER_MS
                } else {
                    DEFAULT_FETCHER_MS
                };
                async move {
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    if fails {
                        Err(FetchError::Status(500))
                    } else {
                        Ok(UsersPage {
                            page,
                            per_page: 2,
                            total: u64::from(total_pages) * 2,
                            total_pages,
                            records: page_records(page),
                        })
                    }
                }
            })
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_mount_loads_first_page() {
        tokio::task::LocalSet::new()
            .run_until(async move {
                let _owner = prep!();
                let listing = MockListing::new(3);

                let directory = PagedUserDirectory::new(listing.fetcher());
                assert!(listing.requested().is_empty());
                assert!(!directory.is_loading());

                let directory = PagedUserDirectory::mount(listing.fetcher());
                assert_eq!(listing.requested(), vec![1]);
                assert!(directory.is_loading());
                assert_eq!(directory.rows(), Rows::Loading);
                assert_eq!(directory.total_pages(), 1);

                settle!();
                assert!(!directory.is_loading());
                assert_eq!(directory.total_pages(), 3);
                assert_eq!(directory.rows(), Rows::Ready(page_records(1)));
                assert!(!directory.can_go_previous());
                assert!(directory.can_go_next());
            })
            .await;
    }

    /// totalPages = 3 on page 1: next fetches page 2, previous serves page 1 from the cache.
    #[rstest]
    #[tokio::test]
    async fn test_next_fetches_then_previous_hits_cache() {
        tokio::task::LocalSet::new()
            .run_until(async move {
                let _owner = prep!();
                let listing = MockListing::new(3);
                let directory = PagedUserDirectory::mount(listing.fetcher());
                settle!();

                directory.go_to_next_page();
                assert_eq!(directory.current_page(), 2);
                assert!(directory.is_loading());
                assert_eq!(listing.requested(), vec![1, 2]);

                settle!();
                assert!(!directory.is_loading());
                assert_eq!(directory.rows(), Rows::Ready(page_records(2)));
                assert!(directory.can_go_previous());
                assert!(directory.can_go_next());

                directory.go_to_previous_page();
                // The hit is applied synchronously, loading is never observable:
                assert!(!directory.is_loading());
                assert_eq!(directory.current_page(), 1);
                assert_eq!(directory.rows(), Rows::Ready(page_records(1)));
                settle!();
                assert_eq!(listing.requested(), vec![1, 2]);
            })
            .await;
    }

    #[rstest]
    #[tokio::test]
    async fn test_navigation_is_bounded() {
        tokio::task::LocalSet::new()
            .run_until(async move {
                let _owner = prep!();
                let listing = MockListing::new(2);
                let directory = PagedUserDirectory::mount(listing.fetcher());
                settle!();

                let before = directory.state().get_untracked();
                directory.go_to_previous_page();
                assert_eq!(directory.state().get_untracked(), before);

                directory.go_to_next_page();
                settle!();
                assert_eq!(directory.current_page(), 2);
                assert!(!directory.can_go_next());

                let before = directory.state().get_untracked();
                directory.go_to_next_page();
                settle!();
                assert_eq!(directory.state().get_untracked(), before);
                assert_eq!(listing.requested(), vec![1, 2]);
            })
            .await;
    }

    /// Reloading any page already fetched never touches the network.
    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(4)]
    #[tokio::test]
    async fn test_cached_pages_are_not_refetched(#[case] page: u32) {
        tokio::task::LocalSet::new()
            .run_until(async move {
                let _owner = prep!();
                let listing = MockListing::new(4);
                let directory = PagedUserDirectory::mount(listing.fetcher());
                settle!();

                directory.load_page(page);
                settle!();
                let cached = directory.cached_page(page);
                assert_eq!(cached, Some(page_records(page)));
                let requests = listing.requested().len();

                directory.load_page(page);
                assert!(!directory.is_loading());
                assert_eq!(directory.rows(), Rows::Ready(page_records(page)));
                assert_eq!(directory.cached_page(page), cached);
                settle!();
                assert_eq!(listing.requested().len(), requests);
            })
            .await;
    }

    #[rstest]
    #[tokio::test]
    async fn test_total_pages_learned_from_fetch() {
        tokio::task::LocalSet::new()
            .run_until(async move {
                let _owner = prep!();
                let listing = MockListing::new(3);
                let directory = PagedUserDirectory::mount(listing.fetcher());
                settle!();
                assert_eq!(directory.total_pages(), 3);

                // The collection grows, the next fetch reports it:
                *listing.total_pages.lock() = 5;
                directory.go_to_next_page();
                settle!();
                assert_eq!(directory.total_pages(), 5);

                // It shrinks, but a cache hit doesn't learn about it:
                *listing.total_pages.lock() = 2;
                directory.go_to_previous_page();
                settle!();
                assert_eq!(directory.total_pages(), 5);
            })
            .await;
    }

    /// A failed page 2 fetch ends loading, leaves page 2 unset and keeps showing page 1.
    #[rstest]
    #[tokio::test]
    async fn test_failed_fetch_is_swallowed() {
        tokio::task::LocalSet::new()
            .run_until(async move {
                let _owner = prep!();
                let listing = MockListing::new(3);
                listing.failing.lock().insert(2);
                let directory = PagedUserDirectory::mount(listing.fetcher());
                settle!();

                directory.go_to_next_page();
                assert!(directory.is_loading());
                settle!();

                assert!(!directory.is_loading());
                assert_eq!(directory.current_page(), 2);
                assert_eq!(directory.cached_page(2), None);
                assert_eq!(directory.rows(), Rows::Ready(page_records(1)));
                assert_eq!(
                    directory.events().variants().last(),
                    Some(DirectoryEventVariant::FetchFailed { page: 2 })
                );

                // No retry happened:
                assert_eq!(listing.requested(), vec![1, 2]);
            })
            .await;
    }

    /// Page 2 resolves after page 3 was requested: it's cached, but page 3 stays on screen.
    #[rstest]
    #[tokio::test]
    async fn test_out_of_order_responses() {
        tokio::task::LocalSet::new()
            .run_until(async move {
                let _owner = prep!();
                let listing = MockListing::new(4);
                listing.slow.lock().insert(2);
                let directory = PagedUserDirectory::mount(listing.fetcher());
                settle!();

                directory.go_to_next_page();
                directory.go_to_next_page();
                assert_eq!(directory.current_page(), 3);
                assert_eq!(listing.requested(), vec![1, 2, 3]);

                tokio::time::sleep(Duration::from_millis(DEFAULT_FETCHER_MS * 2)).await;
                tick!();
                assert!(!directory.is_loading());
                assert_eq!(directory.rows(), Rows::Ready(page_records(3)));
                assert_eq!(directory.cached_page(2), None);

                settle!();
                assert_eq!(directory.current_page(), 3);
                assert_eq!(directory.rows(), Rows::Ready(page_records(3)));
                assert_eq!(directory.cached_page(2), Some(page_records(2)));
                assert!(
                    directory
                        .events()
                        .variants()
                        .any(|variant| variant == DirectoryEventVariant::StaleResponse { page: 2 })
                );

                directory.go_to_previous_page();
                assert_eq!(directory.rows(), Rows::Ready(page_records(2)));
                assert_eq!(listing.requested(), vec![1, 2, 3]);
            })
            .await;
    }

    #[rstest]
    #[tokio::test]
    async fn test_provide_and_expect() {
        tokio::task::LocalSet::new()
            .run_until(async move {
                let owner = prep!();
                let listing = MockListing::new(2);
                let provided = PagedUserDirectory::provide(listing.fetcher());

                let child = owner.child();
                child.with(|| {
                    let directory = PagedUserDirectory::expect();
                    directory.go_to_next_page();
                });
                // Both handles share the same state:
                settle!();
                assert_eq!(listing.requested(), vec![1]);
                assert_eq!(provided.total_pages(), 2);

                child.with(|| PagedUserDirectory::expect().go_to_next_page());
                assert_eq!(provided.current_page(), 2);
                assert_eq!(listing.requested(), vec![1, 2]);
            })
            .await;
    }
}
