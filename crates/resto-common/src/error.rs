/// Error types shared across the restaurant crates.
///
/// These errors represent failures in infrastructure components (HTTP transport, JSON
/// decoding) that any consumer of a remote dataset runs into. Application-specific errors
/// should be defined in each service crate and wrap `CommonError` via `#[from]`.
use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid response JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("upstream returned error: status={status} body={body}")]
    UpstreamStatus { status: StatusCode, body: String },
}
