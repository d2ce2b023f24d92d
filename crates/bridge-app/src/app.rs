//! Main application orchestration.
//!
//! Wires the registries, the pairing and custody clients, the order
//! scheduler, and the HTTP boundary together, then serves until shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{info, warn};

use bridge_core::chain_id_for_key;
use bridge_custody::CustodyClient;
use bridge_pairing::{DynPairingClient, HttpPairingClient, TransactionDispatcher};
use bridge_registry::{OrderRegistry, OrderScheduler, PendingApprovals, SessionRegistry};
use bridge_server::{create_router, AppState, ServerConfig};

use crate::config::AppConfig;
use crate::error::AppResult;

/// Delay before retrying the pairing event poll after a failure.
const EVENT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Main application.
pub struct Application {
    config: AppConfig,
    state: AppState,
    pairing: DynPairingClient,
}

impl Application {
    /// Create a new application, wiring every component from configuration.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let chain_id = chain_id_for_key(&config.chain)?;

        let pairing: DynPairingClient =
            Arc::new(HttpPairingClient::new(&config.pairing.gateway_url)?);
        let custody = Arc::new(CustodyClient::new(
            &config.custody.base_url,
            config.custody.resolve_api_key()?,
        )?);

        let sessions = Arc::new(SessionRegistry::new());
        let approvals = Arc::new(PendingApprovals::new());
        let orders = Arc::new(OrderRegistry::new());
        let dispatcher = Arc::new(TransactionDispatcher::new(pairing.clone(), chain_id));
        let scheduler = Arc::new(OrderScheduler::new(
            sessions.clone(),
            orders.clone(),
            dispatcher.clone(),
            Duration::from_secs(config.orders.interval_secs),
        ));

        let state = AppState::new(
            sessions,
            approvals,
            orders,
            scheduler,
            dispatcher,
            pairing.clone(),
            custody,
            ServerConfig {
                chain_id: chain_id.to_string(),
                clear_all_orders_on_disconnect: config.orders.clear_all_on_disconnect,
            },
        );

        Ok(Self {
            config,
            state,
            pairing,
        })
    }

    /// Run the application until ctrl-c.
    pub async fn run(self) -> AppResult<()> {
        tokio::spawn(log_pairing_events(self.pairing.clone()));

        let addr = format!("0.0.0.0:{}", self.config.listen_port);
        let listener = TcpListener::bind(&addr).await?;
        info!(%addr, chain = %self.config.chain, "Bridge listening");

        let router = create_router(self.state);
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Bridge stopped");
        Ok(())
    }
}

/// Poll pairing-layer events and log them. Events carry no handling logic;
/// session teardown initiated wallet-side still requires a `/disconnect`.
async fn log_pairing_events(pairing: DynPairingClient) {
    loop {
        match pairing.events().await {
            Ok(events) => {
                for event in events {
                    info!(?event, "Pairing event");
                }
            }
            Err(e) => {
                warn!(error = %e, "Pairing event poll failed, retrying");
                tokio::time::sleep(EVENT_RETRY_DELAY).await;
            }
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
}
