//! Namespace-qualified account parsing.
//!
//! Pairing sessions report accounts as CAIP-10 strings of the form
//! `namespace:chain_ref:address` (e.g., `"eip155:5:0xabc..."`). Signing
//! requests need the bare address, so the qualifier is parsed structurally
//! rather than by stripping a fixed-length prefix; this stays correct for
//! chain references of any digit length.

use crate::error::{CoreError, Result};

/// Extract the bare address from a namespace-qualified account string.
///
/// Returns `CoreError::MalformedAccount` when the string does not have the
/// `namespace:chain_ref:address` shape or any segment is empty.
pub fn account_address(qualified: &str) -> Result<&str> {
    let mut parts = qualified.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(ns), Some(chain_ref), Some(address))
            if !ns.is_empty() && !chain_ref.is_empty() && !address.is_empty() =>
        {
            Ok(address)
        }
        _ => Err(CoreError::MalformedAccount(qualified.to_string())),
    }
}
