//! Recurring order scheduler.
//!
//! Each order runs as its own timer task firing at a fixed period. A tick
//! re-resolves both the order and its session from the registries rather
//! than capturing them once, so a concurrent cancel or disconnect is
//! observed on the next firing. Tick failures are fire-and-suppress: logged
//! and counted, never surfaced to any caller.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval_at, Instant};
use tracing::{debug, info, warn};

use bridge_core::{account_address, OrderId, SessionId, EIP155_NAMESPACE};
use bridge_pairing::TransactionDispatcher;
use bridge_telemetry::metrics::ORDER_TICKS_TOTAL;

use crate::orders::OrderRegistry;
use crate::sessions::SessionRegistry;

/// Period between recurring order firings.
pub const DEFAULT_ORDER_INTERVAL: Duration = Duration::from_secs(12);

/// Installs and drives recurring transfer orders.
pub struct OrderScheduler {
    sessions: Arc<SessionRegistry>,
    orders: Arc<OrderRegistry>,
    dispatcher: Arc<TransactionDispatcher>,
    period: Duration,
}

impl OrderScheduler {
    pub fn new(
        sessions: Arc<SessionRegistry>,
        orders: Arc<OrderRegistry>,
        dispatcher: Arc<TransactionDispatcher>,
        period: Duration,
    ) -> Self {
        Self {
            sessions,
            orders,
            dispatcher,
            period,
        }
    }

    /// Create a recurring order with a fresh unique id.
    ///
    /// The timer handle is registered before this returns; the first firing
    /// happens one full period after creation.
    pub fn create_order(&self, session_id: SessionId, to: String, value: String) -> OrderId {
        let order_id = OrderId::new();
        self.install_order(order_id.clone(), session_id, to, value);
        order_id
    }

    /// Install a recurring order under a caller-supplied id.
    ///
    /// Installing under an id that already has a live timer cancels the
    /// previous timer before the new one is registered.
    pub fn install_order(&self, order_id: OrderId, session_id: SessionId, to: String, value: String) {
        info!(%order_id, %session_id, %to, %value, "Creating recurring order");
        let task = tokio::spawn(run_order(
            self.sessions.clone(),
            self.orders.clone(),
            self.dispatcher.clone(),
            order_id.clone(),
            session_id.clone(),
            to,
            value,
            self.period,
        ));
        self.orders.install(order_id, session_id, task);
    }
}

/// Timer loop for one recurring order.
#[allow(clippy::too_many_arguments)]
async fn run_order(
    sessions: Arc<SessionRegistry>,
    orders: Arc<OrderRegistry>,
    dispatcher: Arc<TransactionDispatcher>,
    order_id: OrderId,
    session_id: SessionId,
    to: String,
    value: String,
    period: Duration,
) {
    let mut ticker = interval_at(Instant::now() + period, period);

    loop {
        ticker.tick().await;

        // Re-resolve on every firing; state read before the previous await
        // may have been invalidated by a cancel or disconnect.
        if !orders.contains(&order_id) {
            debug!(%order_id, "Order no longer registered, stopping timer");
            ORDER_TICKS_TOTAL.with_label_values(&["order_missing"]).inc();
            return;
        }

        let session = match sessions.get(&session_id) {
            Ok(session) => session,
            Err(_) => {
                warn!(%order_id, %session_id, "Cannot send transaction: session not found");
                ORDER_TICKS_TOTAL
                    .with_label_values(&["session_missing"])
                    .inc();
                continue;
            }
        };

        let from = match session
            .primary_account(EIP155_NAMESPACE)
            .and_then(account_address)
        {
            Ok(address) => address.to_string(),
            Err(e) => {
                warn!(%order_id, %session_id, error = %e, "Cannot derive sender address");
                ORDER_TICKS_TOTAL.with_label_values(&["bad_account"]).inc();
                continue;
            }
        };

        match dispatcher.send(&session, &from, &to, &value).await {
            Ok(result) => {
                info!(%order_id, ?result, "Recurring transaction sent");
                ORDER_TICKS_TOTAL.with_label_values(&["dispatched"]).inc();
            }
            Err(e) => {
                warn!(%order_id, error = %e, "Recurring transaction failed");
                ORDER_TICKS_TOTAL
                    .with_label_values(&["dispatch_failed"])
                    .inc();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use bridge_core::{PairingSession, SessionNamespace};
    use bridge_pairing::MockPairingClient;

    const TICK: Duration = Duration::from_secs(13);

    fn sample_session(topic: &str) -> PairingSession {
        let mut namespaces = HashMap::new();
        namespaces.insert(
            "eip155".to_string(),
            SessionNamespace {
                accounts: vec!["eip155:5:0x1111111111111111111111111111111111111111".to_string()],
            },
        );
        PairingSession {
            topic: topic.to_string(),
            namespaces,
        }
    }

    struct Fixture {
        sessions: Arc<SessionRegistry>,
        orders: Arc<OrderRegistry>,
        scheduler: OrderScheduler,
        pairing: Arc<MockPairingClient>,
    }

    fn fixture() -> Fixture {
        let sessions = Arc::new(SessionRegistry::new());
        let orders = Arc::new(OrderRegistry::new());
        let pairing = Arc::new(MockPairingClient::new());
        pairing.set_next_request_result(Ok(serde_json::json!("0xHASH")));
        let dispatcher = Arc::new(TransactionDispatcher::new(pairing.clone(), "eip155:5"));
        let scheduler = OrderScheduler::new(
            sessions.clone(),
            orders.clone(),
            dispatcher,
            DEFAULT_ORDER_INTERVAL,
        );
        Fixture {
            sessions,
            orders,
            scheduler,
            pairing,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_order_fires_each_period() {
        let f = fixture();
        let id = SessionId::from("s1");
        f.sessions.put(id.clone(), sample_session("t1"));

        f.scheduler
            .create_order(id, "0xto".to_string(), "0x1".to_string());

        tokio::time::sleep(TICK).await;
        assert_eq!(f.pairing.get_requests().len(), 1);

        tokio::time::sleep(DEFAULT_ORDER_INTERVAL).await;
        assert_eq!(f.pairing.get_requests().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_first_firing_dispatches_nothing() {
        let f = fixture();
        let session_id = SessionId::from("s1");
        f.sessions.put(session_id.clone(), sample_session("t1"));

        let order_id =
            f.scheduler
                .create_order(session_id, "0xto".to_string(), "0x1".to_string());
        f.orders.cancel(&order_id).unwrap();

        tokio::time::sleep(TICK * 3).await;
        assert!(f.pairing.get_requests().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_key_leaves_only_second_timer() {
        let f = fixture();
        let session_id = SessionId::from("s1");
        f.sessions.put(session_id.clone(), sample_session("t1"));

        let key = OrderId::from("ord-key");
        f.scheduler.install_order(
            key.clone(),
            session_id.clone(),
            "0xfirst".to_string(),
            "0x1".to_string(),
        );
        f.scheduler.install_order(
            key,
            session_id,
            "0xsecond".to_string(),
            "0x2".to_string(),
        );

        tokio::time::sleep(TICK).await;

        let requests = f.pairing.get_requests();
        assert_eq!(requests.len(), 1);
        let tx = &requests[0].params[0];
        assert_eq!(tx["to"], "0xsecond");
        assert_eq!(tx["value"], "0x2");
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_observes_session_removal() {
        let f = fixture();
        let session_id = SessionId::from("s1");
        f.sessions.put(session_id.clone(), sample_session("t1"));

        f.scheduler
            .create_order(session_id.clone(), "0xto".to_string(), "0x1".to_string());

        tokio::time::sleep(TICK).await;
        assert_eq!(f.pairing.get_requests().len(), 1);

        // Disconnect between firings: subsequent ticks are no-ops.
        f.sessions.remove(&session_id);
        tokio::time::sleep(DEFAULT_ORDER_INTERVAL * 3).await;
        assert_eq!(f.pairing.get_requests().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_failure_is_suppressed_and_timer_survives() {
        let f = fixture();
        let session_id = SessionId::from("s1");
        f.sessions.put(session_id.clone(), sample_session("t1"));
        f.pairing
            .set_next_request_result(Err("signer rejected".to_string()));

        f.scheduler
            .create_order(session_id, "0xto".to_string(), "0x1".to_string());

        tokio::time::sleep(TICK).await;
        assert_eq!(f.pairing.get_requests().len(), 1);

        // The timer keeps firing; a later success goes through.
        f.pairing
            .set_next_request_result(Ok(serde_json::json!("0xHASH")));
        tokio::time::sleep(DEFAULT_ORDER_INTERVAL).await;
        assert_eq!(f.pairing.get_requests().len(), 2);
    }
}
