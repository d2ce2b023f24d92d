//! Chain identifier constants.

use crate::error::{CoreError, Result};

/// The eip155 namespace used for EVM accounts.
pub const EIP155_NAMESPACE: &str = "eip155";

/// CAIP-2 chain identifier for the Goerli testnet.
pub const CHAIN_GOERLI: &str = "eip155:5";

/// Resolve a configuration chain key to its CAIP-2 chain identifier.
pub fn chain_id_for_key(key: &str) -> Result<&'static str> {
    match key {
        "goerli" => Ok(CHAIN_GOERLI),
        other => Err(CoreError::UnknownChain(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_chain_key() {
        assert_eq!(chain_id_for_key("goerli").unwrap(), "eip155:5");
    }

    #[test]
    fn test_unknown_chain_key() {
        let err = chain_id_for_key("mainnet").unwrap_err();
        assert!(matches!(err, CoreError::UnknownChain(_)));
    }
}
