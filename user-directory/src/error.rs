use thiserror::Error;

/// Failure to obtain a page from the listing service.
///
/// Never surfaced to the user: the directory logs it and keeps showing whatever it displayed before.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connection, CORS, timeout...).
    #[error("request to listing service failed: {0}")]
    Network(String),
    /// The service responded with a non-success status.
    #[error("listing service responded with status {0}")]
    Status(u16),
    /// The response body wasn't a valid listing page.
    #[error("malformed listing response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}
