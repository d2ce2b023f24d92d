//! Wallet-custody bridge application.
//!
//! Orchestrates the bridge components:
//! - Pairing gateway client (connect, approvals, signing, disconnect)
//! - Custody web3-connection lifecycle
//! - Session, approval, and order registries
//! - Recurring order scheduler
//! - HTTP boundary

pub mod app;
pub mod config;
pub mod error;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
