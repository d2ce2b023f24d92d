//! Pairing channel abstraction for the wallet-custody bridge.
//!
//! The wallet pairing protocol (connect, approval, signing requests,
//! disconnect, events) is an external collaborator. This crate consumes it
//! through the `PairingClient` trait and provides:
//! - `HttpPairingClient`: implementation speaking to a sign-client gateway
//! - `MockPairingClient`: recording mock for tests
//! - `TransactionDispatcher`: builds the fixed-shape transfer request and
//!   submits it over a session's signing channel

pub mod client;
pub mod dispatch;
pub mod error;
pub mod types;

pub use client::{
    ApprovalFuture, BoxFuture, DynPairingClient, Handshake, HttpPairingClient, MockPairingClient,
    PairingClient, PairingEvent,
};
pub use dispatch::TransactionDispatcher;
pub use error::{PairingError, PairingResult};
pub use types::{
    ProposalNamespace, ProposalNamespaces, SessionDisconnect, SessionRequest, TransferRequest,
    DEFAULT_TRANSFER_VALUE_WEI, DISCONNECT_CODE_USER, ETH_SEND_TRANSACTION, TRANSFER_CALL_DATA,
    TRANSFER_GAS_LIMIT, TRANSFER_GAS_PRICE,
};
