//! Prometheus metrics for the bridge.
//!
//! # Panics
//!
//! Metric registration uses `unwrap()` intentionally. If registration fails,
//! it indicates a fatal configuration error (e.g., duplicate metric names)
//! that should crash at startup rather than fail silently. These panics only
//! occur during static initialization, never at runtime.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_int_gauge, CounterVec, IntGauge, TextEncoder,
};

/// Number of sessions currently held in the session registry.
pub static SESSIONS_ACTIVE: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "bridge_sessions_active",
        "Pairing sessions currently registered"
    )
    .unwrap()
});

/// Number of recurring orders with a live timer.
pub static ORDERS_ACTIVE: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "bridge_orders_active",
        "Recurring orders currently registered"
    )
    .unwrap()
});

/// Background order tick outcomes.
/// Labels: outcome (dispatched/session_missing/order_missing/bad_account/dispatch_failed)
pub static ORDER_TICKS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "bridge_order_ticks_total",
        "Recurring order tick outcomes",
        &["outcome"]
    )
    .unwrap()
});

/// Foreground transfer dispatches.
/// Labels: result (ok/error)
pub static TRANSFER_DISPATCHES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "bridge_transfer_dispatches_total",
        "Foreground transfer dispatch results",
        &["result"]
    )
    .unwrap()
});

/// HTTP responses by route and status.
pub static HTTP_RESPONSES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "bridge_http_responses_total",
        "HTTP responses by matched route and status code",
        &["route", "status"]
    )
    .unwrap()
});

/// Render all registered metrics in the Prometheus text format.
pub fn render() -> String {
    let encoder = TextEncoder::new();
    encoder
        .encode_to_string(&prometheus::gather())
        .unwrap_or_default()
}
