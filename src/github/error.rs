use thiserror::Error;

/// The only message shown to readers when a fetch fails.
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching featured projects";

/// Failure to obtain repository records.
///
/// Variants exist for logging; readers only ever see
/// [`FETCH_ERROR_MESSAGE`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("GitHub returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to read repository file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode repository list: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Message suitable for display.
    pub fn user_message(&self) -> &'static str {
        FETCH_ERROR_MESSAGE
    }
}
