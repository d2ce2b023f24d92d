//! Pairing error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PairingError {
    #[error("Pairing client not initialized")]
    NotInitialized,

    #[error("Pairing channel error: {0}")]
    Channel(String),

    #[error("Pairing approval failed: {0}")]
    Approval(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PairingResult<T> = Result<T, PairingError>;
