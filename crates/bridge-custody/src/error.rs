//! Custody error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CustodyError {
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Custody API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CustodyResult<T> = Result<T, CustodyError>;
