use thiserror::Error;

/// Why a generated reading could not be produced.
///
/// Every variant ends in the canned fallback; the distinction only matters
/// for logging.
#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("no API key in ${0}")]
    MissingApiKey(String),

    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed reply: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("reply contained no text")]
    EmptyReply,
}
