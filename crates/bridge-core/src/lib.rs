//! Core domain types for the wallet-custody bridge.
//!
//! This crate provides the fundamental types shared across the bridge:
//! - `SessionId`, `OrderId`: identifiers for pairing sessions and recurring orders
//! - `PairingSession`: the approved pairing record (topic + namespace accounts)
//! - Namespace-qualified account parsing (`account_address`)
//! - Chain identifier constants

pub mod account;
pub mod chain;
pub mod error;
pub mod order;
pub mod session;

pub use account::account_address;
pub use chain::{chain_id_for_key, CHAIN_GOERLI, EIP155_NAMESPACE};
pub use error::{CoreError, Result};
pub use order::OrderId;
pub use session::{PairingSession, SessionId, SessionNamespace};
