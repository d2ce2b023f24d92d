//! HTTP boundary for the wallet-custody bridge.
//!
//! Exposes the registries and the transaction dispatcher as a JSON API:
//! connect/approve/disconnect for the pairing lifecycle, send for one-shot
//! transfers, create-order/cancel-order for recurring transfers, plus
//! `/metrics` and `/healthz`.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{AppState, ServerConfig};
