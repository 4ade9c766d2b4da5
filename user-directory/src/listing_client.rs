use tracing::debug;

use crate::{DirectoryOptions, FetchError, PageFetcher, UsersPage};

/// HTTP client for the remote user listing.
///
/// Issues `GET {base_url}?page={page}&per_page={page_size}` and decodes the JSON listing.
#[derive(Debug, Clone)]
pub struct ListingClient {
    http_client: reqwest::Client,
    options: DirectoryOptions,
}

impl ListingClient {
    /// Create a new [`ListingClient`].
    pub fn new(options: DirectoryOptions) -> Self {
        Self::with_http_client(reqwest::Client::new(), options)
    }

    /// Create a new [`ListingClient`] reusing an existing [`reqwest::Client`].
    pub fn with_http_client(http_client: reqwest::Client, options: DirectoryOptions) -> Self {
        Self {
            http_client,
            options,
        }
    }

    /// The options this client requests with.
    pub fn options(&self) -> &DirectoryOptions {
        &self.options
    }

    /// Fetch one page, starting from 1. Non-success statuses are errors.
    pub async fn fetch_page(&self, page: u32) -> Result<UsersPage, FetchError> {
        let url = self.options.base_url();
        let page_size = self.options.page_size();

        debug!(%url, page, page_size, "GET users page");
        let response = self
            .http_client
            .get(url)
            .query(&[("page", page), ("per_page", page_size)])
            .send()
            .await?
            .error_for_status()?;
        let users_page = response.json::<UsersPage>().await?;

        debug!(page, records = users_page.records.len(), "users page received");
        Ok(users_page)
    }

    /// Wrap this client as the [`PageFetcher`] for a [`crate::PagedUserDirectory`].
    pub fn into_fetcher(self) -> PageFetcher {
        PageFetcher::new(move |page| {
            let client = self.clone();
            async move { client.fetch_page(page).await }
        })
    }
}
