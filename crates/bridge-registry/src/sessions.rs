//! In-memory session registry.

use std::collections::HashMap;

use parking_lot::RwLock;

use bridge_core::{PairingSession, SessionId};
use bridge_telemetry::metrics::SESSIONS_ACTIVE;

use crate::error::{RegistryError, RegistryResult};

/// Maps session ids to approved pairing sessions.
///
/// No persistence; lifetime = process lifetime. Operations never suspend, so
/// each call is atomic with respect to the cooperative scheduling model.
#[derive(Default)]
pub struct SessionRegistry {
    inner: RwLock<HashMap<SessionId, PairingSession>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or overwrite a session. Last write wins.
    pub fn put(&self, id: SessionId, session: PairingSession) {
        let mut inner = self.inner.write();
        inner.insert(id, session);
        SESSIONS_ACTIVE.set(inner.len() as i64);
    }

    /// Look up a session by id.
    ///
    /// Absence is a checked, reportable condition, never a panic.
    pub fn get(&self, id: &SessionId) -> RegistryResult<PairingSession> {
        self.inner
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::SessionNotFound(id.clone()))
    }

    /// Remove a session. Idempotent: removing an absent id is not an error.
    pub fn remove(&self, id: &SessionId) -> Option<PairingSession> {
        let mut inner = self.inner.write();
        let removed = inner.remove(id);
        SESSIONS_ACTIVE.set(inner.len() as i64);
        removed
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.inner.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap as StdHashMap;

    use bridge_core::SessionNamespace;

    fn sample_session(topic: &str) -> PairingSession {
        let mut namespaces = StdHashMap::new();
        namespaces.insert(
            "eip155".to_string(),
            SessionNamespace {
                accounts: vec!["eip155:5:0xabc".to_string()],
            },
        );
        PairingSession {
            topic: topic.to_string(),
            namespaces,
        }
    }

    #[test]
    fn test_get_absent_is_not_found() {
        let registry = SessionRegistry::new();
        let err = registry.get(&SessionId::from("missing")).unwrap_err();
        assert!(matches!(err, RegistryError::SessionNotFound(_)));
    }

    #[test]
    fn test_put_get_remove() {
        let registry = SessionRegistry::new();
        let id = SessionId::from("s1");
        registry.put(id.clone(), sample_session("t1"));

        assert_eq!(registry.get(&id).unwrap().topic, "t1");
        assert!(registry.contains(&id));

        registry.remove(&id);
        assert!(!registry.contains(&id));
        assert!(registry.get(&id).is_err());
    }

    #[test]
    fn test_put_overwrites_last_write_wins() {
        let registry = SessionRegistry::new();
        let id = SessionId::from("s1");
        registry.put(id.clone(), sample_session("t1"));
        registry.put(id.clone(), sample_session("t2"));
        assert_eq!(registry.get(&id).unwrap().topic, "t2");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_absent_is_idempotent() {
        let registry = SessionRegistry::new();
        assert!(registry.remove(&SessionId::from("missing")).is_none());
    }
}
