//! Pairing session record and identifiers.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::account::account_address;
use crate::error::{CoreError, Result};

/// Identifier of a pairing session.
///
/// The custody layer assigns this id when the web3 connection is created; it
/// keys the session registry, the pending-approval registry, and the orders
/// that reference the session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Accounts negotiated for one namespace of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionNamespace {
    /// Namespace-qualified account strings (e.g., `"eip155:5:0xabc..."`).
    pub accounts: Vec<String>,
}

/// An approved pairing session.
///
/// The `topic` is opaque to the bridge and is required for every signing
/// request routed over the pairing channel. A session is usable for signing
/// only once the pairing approval has resolved into this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingSession {
    /// Pairing topic addressing the signing channel.
    pub topic: String,
    /// Namespace name to negotiated accounts.
    pub namespaces: HashMap<String, SessionNamespace>,
}

impl PairingSession {
    /// First namespace-qualified account for `namespace`.
    pub fn primary_account(&self, namespace: &str) -> Result<&str> {
        self.namespaces
            .get(namespace)
            .and_then(|ns| ns.accounts.first())
            .map(String::as_str)
            .ok_or_else(|| CoreError::MissingNamespaceAccount(namespace.to_string()))
    }

    /// Bare address of the first account for `namespace`.
    pub fn signing_address(&self, namespace: &str) -> Result<&str> {
        account_address(self.primary_account(namespace)?)
    }
}
