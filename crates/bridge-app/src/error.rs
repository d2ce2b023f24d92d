//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Core error: {0}")]
    Core(#[from] bridge_core::CoreError),

    #[error("Pairing error: {0}")]
    Pairing(#[from] bridge_pairing::PairingError),

    #[error("Custody error: {0}")]
    Custody(#[from] bridge_custody::CustodyError),

    #[error("Registry error: {0}")]
    Registry(#[from] bridge_registry::RegistryError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] bridge_telemetry::TelemetryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
