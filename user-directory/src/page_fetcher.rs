use std::{
    fmt::{self, Debug, Formatter},
    future::Future,
    sync::Arc,
};

use futures::{FutureExt, future::LocalBoxFuture};
use send_wrapper::SendWrapper;

use crate::{FetchError, UsersPage};

type FetchFn = dyn Fn(u32) -> LocalBoxFuture<'static, Result<UsersPage, FetchError>>;

/// A wrapper for the function that fetches one page of users.
///
/// The function runs on the UI thread only, so neither it nor its future need to be `Send`.
/// The wrapper itself can still be moved into `Send` closures such as view event handlers,
/// but will panic if actually used from a different thread than the one that created it.
#[derive(Clone)]
pub struct PageFetcher {
    fetch: SendWrapper<Arc<FetchFn>>,
}

impl Debug for PageFetcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageFetcher")
            .field("fetch", &"Arc<dyn Fn(u32) -> LocalBoxFuture<Result<UsersPage, FetchError>>>")
            .finish()
    }
}

impl PageFetcher {
    /// Create a new [`PageFetcher`] from an async function taking the page number, starting from 1.
    pub fn new<Fut>(fetch: impl Fn(u32) -> Fut + 'static) -> Self
    where
        Fut: Future<Output = Result<UsersPage, FetchError>> + 'static,
    {
        let boxed: Arc<FetchFn> = Arc::new(move |page: u32| fetch(page).boxed_local());
        Self {
            fetch: SendWrapper::new(boxed),
        }
    }

    /// Fetch `page`.
    ///
    /// # Panics
    ///
    /// Panics if called from a different thread than the one the fetcher was created on.
    #[track_caller]
    pub fn fetch(&self, page: u32) -> LocalBoxFuture<'static, Result<UsersPage, FetchError>> {
        let fetch = &**self.fetch;
        fetch(page)
    }
}
