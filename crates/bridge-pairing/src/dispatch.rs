//! Transaction dispatcher.
//!
//! Builds the fixed-shape transfer request and submits it over a session's
//! signing channel. Stateless given a session and parameters; the signer's
//! result is returned verbatim and any channel error propagates unchanged.

use serde_json::json;
use tracing::debug;

use bridge_core::PairingSession;

use crate::client::DynPairingClient;
use crate::error::PairingResult;
use crate::types::{SessionRequest, TransferRequest, ETH_SEND_TRANSACTION};

/// Dispatches transfer requests over the pairing channel.
pub struct TransactionDispatcher {
    client: DynPairingClient,
    /// CAIP-2 chain identifier every request is addressed to.
    chain_id: String,
}

impl TransactionDispatcher {
    /// Create a new dispatcher targeting one chain.
    pub fn new(client: DynPairingClient, chain_id: impl Into<String>) -> Self {
        Self {
            client,
            chain_id: chain_id.into(),
        }
    }

    /// Target chain identifier.
    #[must_use]
    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// Send a transfer of `value` (hex-encoded wei) from `from` to `to` over
    /// the session's signing channel.
    ///
    /// Performs no validation of the signer's result and no retry.
    pub async fn send(
        &self,
        session: &PairingSession,
        from: &str,
        to: &str,
        value: &str,
    ) -> PairingResult<serde_json::Value> {
        let tx = TransferRequest::transfer(from, to, value);
        debug!(topic = %session.topic, %to, %value, "Dispatching transfer");

        self.client
            .request(SessionRequest {
                topic: session.topic.clone(),
                method: ETH_SEND_TRANSACTION.to_string(),
                params: json!([tx]),
                chain_id: self.chain_id.clone(),
            })
            .await
    }
}
