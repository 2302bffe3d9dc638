use thiserror::Error;

/// Result type alias using stride-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the notification API client.
///
/// None of these are fatal to the host: pagination fail-closes on fetch
/// errors and mutation errors leave the optimistic local state in place.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server rejected the request
    #[error("API error: {message} ({status})")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Invalid payload: {0}")]
    Decode(#[from] serde_json::Error),
}
