//! Wire types for the pairing channel.
//!
//! Field names serialize in the casing the pairing library and wallets
//! expect (`gasPrice`, `chainId`, ...).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// JSON-RPC method for a plain value transfer.
pub const ETH_SEND_TRANSACTION: &str = "eth_sendTransaction";

/// Fixed gas price attached to every dispatched transfer.
pub const TRANSFER_GAS_PRICE: &str = "0x029104e28c";

/// Fixed gas limit for a plain transfer (21000).
pub const TRANSFER_GAS_LIMIT: &str = "0x5208";

/// Empty call data for a plain transfer.
pub const TRANSFER_CALL_DATA: &str = "0x";

/// Default transfer amount (0.1 ETH in wei) used when the caller supplies none.
pub const DEFAULT_TRANSFER_VALUE_WEI: &str = "0x16345785d8a0000";

/// Disconnect reason code for a user-initiated disconnect.
pub const DISCONNECT_CODE_USER: u32 = 6000;

/// A single namespace proposal for a pairing connect call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalNamespace {
    pub chains: Vec<String>,
    pub methods: Vec<String>,
    pub events: Vec<String>,
}

/// Required namespaces proposed when initiating a pairing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProposalNamespaces(pub HashMap<String, ProposalNamespace>);

impl ProposalNamespaces {
    /// Standard eip155 proposal for one chain: value transfers plus
    /// connect/disconnect events.
    pub fn eip155(chain_id: &str) -> Self {
        let mut map = HashMap::new();
        map.insert(
            bridge_core::EIP155_NAMESPACE.to_string(),
            ProposalNamespace {
                chains: vec![chain_id.to_string()],
                methods: vec![ETH_SEND_TRANSACTION.to_string()],
                events: vec!["connect".to_string(), "disconnect".to_string()],
            },
        );
        Self(map)
    }
}

/// Fixed-shape transfer request dispatched over the signing channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from: String,
    pub to: String,
    pub data: String,
    pub gas_price: String,
    pub gas_limit: String,
    pub value: String,
}

impl TransferRequest {
    /// Build a plain value transfer with the fixed gas parameters.
    pub fn transfer(from: &str, to: &str, value: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            data: TRANSFER_CALL_DATA.to_string(),
            gas_price: TRANSFER_GAS_PRICE.to_string(),
            gas_limit: TRANSFER_GAS_LIMIT.to_string(),
            value: value.to_string(),
        }
    }
}

/// A signing request addressed to a session topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub topic: String,
    pub method: String,
    pub params: serde_json::Value,
    pub chain_id: String,
}

/// Parameters of a pairing disconnect call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDisconnect {
    pub topic: String,
    pub code: u32,
    pub message: String,
}

impl SessionDisconnect {
    /// User-initiated disconnect for a topic.
    pub fn user(topic: &str) -> Self {
        Self {
            topic: topic.to_string(),
            code: DISCONNECT_CODE_USER,
            message: "User disconnected".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_request_wire_casing() {
        let tx = TransferRequest::transfer("0xfrom", "0xto", "0x1");
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["gasPrice"], "0x029104e28c");
        assert_eq!(json["gasLimit"], "0x5208");
        assert_eq!(json["data"], "0x");
        assert_eq!(json["value"], "0x1");
        assert_eq!(json["from"], "0xfrom");
        assert_eq!(json["to"], "0xto");
    }

    #[test]
    fn test_session_request_wire_casing() {
        let req = SessionRequest {
            topic: "t".to_string(),
            method: ETH_SEND_TRANSACTION.to_string(),
            params: serde_json::json!([]),
            chain_id: "eip155:5".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["chainId"], "eip155:5");
        assert_eq!(json["method"], "eth_sendTransaction");
    }

    #[test]
    fn test_eip155_proposal() {
        let ns = ProposalNamespaces::eip155("eip155:5");
        let proposal = ns.0.get("eip155").unwrap();
        assert_eq!(proposal.chains, vec!["eip155:5"]);
        assert_eq!(proposal.methods, vec!["eth_sendTransaction"]);
        assert_eq!(proposal.events, vec!["connect", "disconnect"]);
    }

    #[test]
    fn test_user_disconnect() {
        let d = SessionDisconnect::user("topic-9");
        assert_eq!(d.code, DISCONNECT_CODE_USER);
        assert_eq!(d.message, "User disconnected");
    }
}
