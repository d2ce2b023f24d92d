//! Shared application state for axum handlers.

use std::sync::Arc;

use bridge_custody::DynCustodyApi;
use bridge_pairing::{DynPairingClient, TransactionDispatcher};
use bridge_registry::{OrderRegistry, OrderScheduler, PendingApprovals, SessionRegistry};

/// Boundary configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// CAIP-2 chain identifier proposed to wallets and used for dispatch.
    pub chain_id: String,
    /// Legacy behavior: a disconnect clears every order process-wide instead
    /// of only the disconnected session's orders.
    pub clear_all_orders_on_disconnect: bool,
}

/// Shared state handed to every handler. All registries are constructed once
/// at process start; no ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionRegistry>,
    pub approvals: Arc<PendingApprovals>,
    pub orders: Arc<OrderRegistry>,
    pub scheduler: Arc<OrderScheduler>,
    pub dispatcher: Arc<TransactionDispatcher>,
    pub pairing: DynPairingClient,
    pub custody: DynCustodyApi,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sessions: Arc<SessionRegistry>,
        approvals: Arc<PendingApprovals>,
        orders: Arc<OrderRegistry>,
        scheduler: Arc<OrderScheduler>,
        dispatcher: Arc<TransactionDispatcher>,
        pairing: DynPairingClient,
        custody: DynCustodyApi,
        config: ServerConfig,
    ) -> Self {
        Self {
            sessions,
            approvals,
            orders,
            scheduler,
            dispatcher,
            pairing,
            custody,
            config: Arc::new(config),
        }
    }
}
