use serde::{Deserialize, Serialize};

/// One user's directory entry, as returned by the listing service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserRecord {
    /// Remote identifier of the user.
    pub id: u64,
    /// Contact email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// URL of the user's avatar image.
    #[serde(rename = "avatar")]
    pub avatar_url: String,
}

impl UserRecord {
    /// `"{first_name} {last_name}"`, used as the avatar's alt text.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A single page of the remote listing.
///
/// Only `data` and `total_pages` are required on the wire, the remaining metadata defaults to zero when missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersPage {
    /// The page this response is for, starting from 1.
    #[serde(default)]
    pub page: u32,
    /// The page size the service applied.
    #[serde(default)]
    pub per_page: u32,
    /// Total number of users across all pages.
    #[serde(default)]
    pub total: u64,
    /// Total number of pages at the requested page size.
    pub total_pages: u32,
    /// The users on this page, in display order.
    #[serde(rename = "data")]
    pub records: Vec<UserRecord>,
}
