//! Registry error types.

use thiserror::Error;

use bridge_core::{OrderId, SessionId};
use bridge_pairing::PairingError;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Session {0} not found")]
    SessionNotFound(SessionId),

    #[error("Order {0} not found")]
    OrderNotFound(OrderId),

    #[error("No pending approval for session {0}")]
    ApprovalNotFound(SessionId),

    #[error(transparent)]
    Approval(#[from] PairingError),
}

pub type RegistryResult<T> = Result<T, RegistryError>;
