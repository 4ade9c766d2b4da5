use std::borrow::Cow;

pub(crate) const DEFAULT_BASE_URL: &str = "https://reqres.in/api/users";
pub(crate) const DEFAULT_PAGE_SIZE: u32 = 6;

/// Configuration for the [`crate::ListingClient`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryOptions {
    base_url: Option<Cow<'static, str>>,
    page_size: Option<u32>,
}

impl DirectoryOptions {
    /// Create new [`DirectoryOptions`] with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the listing endpoint, `page` and `per_page` are appended as query parameters.
    ///
    /// Default: `https://reqres.in/api/users`
    pub fn with_base_url(mut self, base_url: impl Into<Cow<'static, str>>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the number of users requested per page.
    ///
    /// A page size of 0 is ignored, the service would otherwise report no pages at all.
    ///
    /// Default: `6`
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        if page_size > 0 {
            self.page_size = Some(page_size);
        }
        self
    }

    /// The listing endpoint.
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// The number of users requested per page.
    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}
