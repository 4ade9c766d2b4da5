use std::collections::BTreeMap;

use crate::UserRecord;

/// Pages already fetched, keyed by page number.
///
/// Grows for the lifetime of the directory, nothing is ever evicted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageCache {
    pages: BTreeMap<u32, Vec<UserRecord>>,
}

impl PageCache {
    pub(crate) fn insert(&mut self, page: u32, records: Vec<UserRecord>) {
        self.pages.insert(page, records);
    }

    /// The cached records for `page`, if it has been fetched.
    pub fn get(&self, page: u32) -> Option<&[UserRecord]> {
        self.pages.get(&page).map(Vec::as_slice)
    }

    /// Whether `page` has been fetched.
    pub fn contains(&self, page: u32) -> bool {
        self.pages.contains_key(&page)
    }

    /// The cached page numbers, ascending.
    pub fn pages(&self) -> impl Iterator<Item = u32> + '_ {
        self.pages.keys().copied()
    }

    /// Number of cached pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
