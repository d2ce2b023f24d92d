//! Error types for bridge-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Malformed namespace-qualified account: {0}")]
    MalformedAccount(String),

    #[error("No account for namespace {0} in session")]
    MissingNamespaceAccount(String),

    #[error("Unknown chain key: {0}")]
    UnknownChain(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
