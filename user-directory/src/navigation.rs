/// Where the directory is, and whether it's waiting on the listing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NavigationState {
    /// The page being shown, starting from 1.
    pub current_page: u32,
    /// Page count last reported by the listing service, 1 until the first successful fetch.
    pub total_pages: u32,
    /// Whether a fetch for `current_page` is in flight.
    pub is_loading: bool,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            is_loading: false,
        }
    }
}

impl NavigationState {
    /// Previous is enabled iff not on the first page.
    pub fn can_go_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Next is enabled iff there's a known page after the current one.
    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// The page before the current one, if navigation allows it.
    pub(crate) fn previous(self) -> Option<Self> {
        self.can_go_previous().then(|| Self {
            current_page: self.current_page - 1,
            ..self
        })
    }

    /// The page after the current one, if navigation allows it.
    pub(crate) fn next(self) -> Option<Self> {
        self.can_go_next().then(|| Self {
            current_page: self.current_page + 1,
            ..self
        })
    }
}
