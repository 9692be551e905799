//! Fetch errors shared by the network and app layers

/// Error kinds surfaced to the presentation layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Decode,
    NotFound,
}

impl ErrorKind {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorKind::Network => "Network error",
            ErrorKind::Decode => "Bad response",
            ErrorKind::NotFound => "Not found",
        }
    }
}

/// Failure of a single fetch.
///
/// Carries rendered messages instead of the underlying `reqwest`/`serde_json`
/// errors so it can be cloned into render snapshots and compared in tests.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// No usable response: connect failure, timeout, or an error status
    #[error("network error: {0}")]
    Network(String),
    /// Body is not valid JSON, has the wrong shape, or fails validation
    #[error("decode error: {0}")]
    Decode(String),
    /// The source answered but has no such record
    #[error("not found: {0}")]
    NotFound(String),
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Network(_) => ErrorKind::Network,
            FetchError::Decode(_) => ErrorKind::Decode,
            FetchError::NotFound(_) => ErrorKind::NotFound,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            FetchError::Network(msg) | FetchError::Decode(msg) | FetchError::NotFound(msg) => msg,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Network("Request timed out".to_string())
        } else if e.is_connect() {
            FetchError::Network(format!("Connection failed: {}", e))
        } else if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Network(format!("Request failed: {}", e))
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}
