//! In-memory order registry.

use std::collections::HashMap;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use bridge_core::{OrderId, SessionId};
use bridge_telemetry::metrics::ORDERS_ACTIVE;

use crate::error::{RegistryError, RegistryResult};

/// A registered recurring order: its session reference and the handle of the
/// timer task driving it.
struct OrderHandle {
    session_id: SessionId,
    task: JoinHandle<()>,
}

/// Maps order ids to live recurrence handles.
///
/// Invariant: at most one live timer per order id. Installing under an
/// existing id aborts the previous timer before the new one is registered,
/// so two timers are never live for the same key.
#[derive(Default)]
pub struct OrderRegistry {
    inner: Mutex<HashMap<OrderId, OrderHandle>>,
}

impl OrderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a recurrence handle under `id`. Cancel-before-replace: a
    /// previous handle under the same id is aborted first.
    pub fn install(&self, id: OrderId, session_id: SessionId, task: JoinHandle<()>) {
        let mut inner = self.inner.lock();
        if let Some(previous) = inner.insert(id.clone(), OrderHandle { session_id, task }) {
            debug!(order_id = %id, "Replacing existing order, cancelling previous timer");
            previous.task.abort();
        }
        ORDERS_ACTIVE.set(inner.len() as i64);
    }

    /// Cancel and remove an order.
    ///
    /// Unknown ids are a checked condition reported to the caller, unlike
    /// background tick misses which are merely logged.
    pub fn cancel(&self, id: &OrderId) -> RegistryResult<()> {
        let mut inner = self.inner.lock();
        let handle = inner
            .remove(id)
            .ok_or_else(|| RegistryError::OrderNotFound(id.clone()))?;
        handle.task.abort();
        ORDERS_ACTIVE.set(inner.len() as i64);
        Ok(())
    }

    pub fn contains(&self, id: &OrderId) -> bool {
        self.inner.lock().contains_key(id)
    }

    /// Cancel every order tied to `session_id`. Returns how many were removed.
    pub fn remove_for_session(&self, session_id: &SessionId) -> usize {
        let mut inner = self.inner.lock();
        let doomed: Vec<OrderId> = inner
            .iter()
            .filter(|(_, handle)| &handle.session_id == session_id)
            .map(|(id, _)| id.clone())
            .collect();
        for id in &doomed {
            if let Some(handle) = inner.remove(id) {
                handle.task.abort();
            }
        }
        ORDERS_ACTIVE.set(inner.len() as i64);
        doomed.len()
    }

    /// Cancel every order process-wide. Returns how many were removed.
    pub fn clear_all(&self) -> usize {
        let mut inner = self.inner.lock();
        let count = inner.len();
        for (_, handle) in inner.drain() {
            handle.task.abort();
        }
        ORDERS_ACTIVE.set(0);
        count
    }

    pub fn active_count(&self) -> usize {
        self.inner.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle_task() -> JoinHandle<()> {
        tokio::spawn(std::future::pending())
    }

    #[tokio::test]
    async fn test_cancel_unknown_order_is_not_found() {
        let registry = OrderRegistry::new();
        let err = registry.cancel(&OrderId::from("missing")).unwrap_err();
        assert!(matches!(err, RegistryError::OrderNotFound(_)));
    }

    #[tokio::test]
    async fn test_install_and_cancel() {
        let registry = OrderRegistry::new();
        let id = OrderId::new();
        registry.install(id.clone(), SessionId::from("s1"), idle_task());
        assert!(registry.contains(&id));

        registry.cancel(&id).unwrap();
        assert!(!registry.contains(&id));
        assert_eq!(registry.active_count(), 0);
    }

    #[tokio::test]
    async fn test_install_duplicate_key_aborts_previous() {
        let registry = OrderRegistry::new();
        let id = OrderId::from("ord-dup");

        let first = idle_task();
        let first_abort = first.abort_handle();
        registry.install(id.clone(), SessionId::from("s1"), first);
        registry.install(id.clone(), SessionId::from("s1"), idle_task());

        // One live handle under the key, and the first task was aborted.
        assert_eq!(registry.active_count(), 1);
        tokio::task::yield_now().await;
        assert!(first_abort.is_finished());
    }

    #[tokio::test]
    async fn test_remove_for_session_scopes_to_session() {
        let registry = OrderRegistry::new();
        registry.install(OrderId::from("a"), SessionId::from("s1"), idle_task());
        registry.install(OrderId::from("b"), SessionId::from("s1"), idle_task());
        registry.install(OrderId::from("c"), SessionId::from("s2"), idle_task());

        assert_eq!(registry.remove_for_session(&SessionId::from("s1")), 2);
        assert!(!registry.contains(&OrderId::from("a")));
        assert!(!registry.contains(&OrderId::from("b")));
        assert!(registry.contains(&OrderId::from("c")));
    }

    #[tokio::test]
    async fn test_clear_all_removes_everything() {
        let registry = OrderRegistry::new();
        registry.install(OrderId::from("a"), SessionId::from("s1"), idle_task());
        registry.install(OrderId::from("b"), SessionId::from("s2"), idle_task());

        assert_eq!(registry.clear_all(), 2);
        assert_eq!(registry.active_count(), 0);
    }
}
