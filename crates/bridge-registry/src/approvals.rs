//! Pending pairing approvals.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::info;

use bridge_core::{PairingSession, SessionId};
use bridge_pairing::ApprovalFuture;

use crate::error::{RegistryError, RegistryResult};
use crate::sessions::SessionRegistry;

/// Maps session ids to not-yet-resolved approval handles.
///
/// An approval handle and its resulting session are mutually exclusive: the
/// entry is removed before the approval is awaited, so once a session exists
/// under an id there is no pending entry left, and resolving a second time
/// reports `ApprovalNotFound` rather than silently succeeding.
#[derive(Default)]
pub struct PendingApprovals {
    inner: Mutex<HashMap<SessionId, ApprovalFuture>>,
}

impl PendingApprovals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pending approval under `id`, replacing any previous one.
    pub fn register(&self, id: SessionId, approval: ApprovalFuture) {
        self.inner.lock().insert(id, approval);
    }

    /// Remove and return the pending approval for `id`.
    pub fn take(&self, id: &SessionId) -> RegistryResult<ApprovalFuture> {
        self.inner
            .lock()
            .remove(id)
            .ok_or_else(|| RegistryError::ApprovalNotFound(id.clone()))
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.inner.lock().contains_key(id)
    }

    /// Resolve the pending approval for `id`: await the wallet-side approval
    /// and store the resulting session into `sessions` under the same id.
    ///
    /// The pending entry is consumed up front (while no lock is held across
    /// the await), so a concurrent or repeated resolve observes absence.
    pub async fn resolve(
        &self,
        id: &SessionId,
        sessions: &SessionRegistry,
    ) -> RegistryResult<PairingSession> {
        let approval = self.take(id)?;
        let session = approval.await?;
        sessions.put(id.clone(), session.clone());
        info!(%id, topic = %session.topic, "Pairing approved, session stored");
        Ok(session)
    }
}
