//! Prometheus metrics and structured logging for the bridge.
//!
//! Background order firings have no synchronous caller to report to, so
//! their outcomes flow through these metrics and the tracing log rather
//! than any HTTP response.

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
