//! Custody API trait and HTTP client.

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CustodyError, CustodyResult};

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Default timeout for custody API requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Payload for creating a web3 connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Web3ConnectionRequest {
    pub fee_level: String,
    pub vault_account_id: u32,
    pub chain_ids: Vec<String>,
    pub uri: String,
}

impl Web3ConnectionRequest {
    /// Standard wallet-connect payload: medium fee level, vault account 0,
    /// ETH chain, carrying the pairing URI.
    pub fn wallet_connect(uri: &str) -> Self {
        Self {
            fee_level: "MEDIUM".to_string(),
            vault_account_id: 0,
            chain_ids: vec!["ETH".to_string()],
            uri: uri.to_string(),
        }
    }
}

/// Response to a connection create call.
#[derive(Debug, Clone, Deserialize)]
pub struct Web3ConnectionCreated {
    /// Custody-assigned connection id; doubles as the bridge session id.
    pub id: String,
}

#[derive(Debug, Serialize)]
struct SubmitRequest {
    approve: bool,
}

/// Trait for the custody connection-management API.
pub trait CustodyApi: Send + Sync {
    /// Create a web3 connection carrying the pairing URI.
    fn create_web3_connection(
        &self,
        payload: Web3ConnectionRequest,
    ) -> BoxFuture<'_, CustodyResult<Web3ConnectionCreated>>;

    /// Approve or reject a created connection.
    fn submit_web3_connection<'a>(
        &'a self,
        id: &'a str,
        approve: bool,
    ) -> BoxFuture<'a, CustodyResult<()>>;

    /// Remove a connection.
    fn remove_web3_connection<'a>(&'a self, id: &'a str) -> BoxFuture<'a, CustodyResult<()>>;
}

/// Arc wrapper for CustodyApi trait objects.
pub type DynCustodyApi = Arc<dyn CustodyApi>;

// ============================================================================
// CustodyClient
// ============================================================================

/// HTTP client for the custody connections API.
pub struct CustodyClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CustodyClient {
    /// Create a new custody client.
    ///
    /// # Arguments
    /// * `base_url` - Custody API base (e.g., "https://api.fireblocks.io")
    /// * `api_key` - API key sent on every request
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> CustodyResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| CustodyError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn connections_url(&self, id: Option<&str>) -> String {
        match id {
            Some(id) => format!("{}/v1/connections/wc/{id}", self.base_url),
            None => format!("{}/v1/connections/wc", self.base_url),
        }
    }

    async fn check(response: reqwest::Response) -> CustodyResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CustodyError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

impl CustodyApi for CustodyClient {
    fn create_web3_connection(
        &self,
        payload: Web3ConnectionRequest,
    ) -> BoxFuture<'_, CustodyResult<Web3ConnectionCreated>> {
        Box::pin(async move {
            debug!(url = %self.connections_url(None), "Creating web3 connection");
            let response = self
                .client
                .post(self.connections_url(None))
                .header("X-API-Key", &self.api_key)
                .json(&payload)
                .send()
                .await
                .map_err(|e| CustodyError::HttpClient(format!("HTTP request failed: {e}")))?;

            let created: Web3ConnectionCreated = Self::check(response)
                .await?
                .json()
                .await
                .map_err(|e| CustodyError::HttpClient(format!("Failed to parse response: {e}")))?;

            info!(id = %created.id, "Web3 connection created");
            Ok(created)
        })
    }

    fn submit_web3_connection<'a>(
        &'a self,
        id: &'a str,
        approve: bool,
    ) -> BoxFuture<'a, CustodyResult<()>> {
        Box::pin(async move {
            let response = self
                .client
                .put(self.connections_url(Some(id)))
                .header("X-API-Key", &self.api_key)
                .json(&SubmitRequest { approve })
                .send()
                .await
                .map_err(|e| CustodyError::HttpClient(format!("HTTP request failed: {e}")))?;

            Self::check(response).await?;
            info!(%id, approve, "Web3 connection submitted");
            Ok(())
        })
    }

    fn remove_web3_connection<'a>(&'a self, id: &'a str) -> BoxFuture<'a, CustodyResult<()>> {
        Box::pin(async move {
            let response = self
                .client
                .delete(self.connections_url(Some(id)))
                .header("X-API-Key", &self.api_key)
                .send()
                .await
                .map_err(|e| CustodyError::HttpClient(format!("HTTP request failed: {e}")))?;

            Self::check(response).await?;
            info!(%id, "Web3 connection removed");
            Ok(())
        })
    }
}

// ============================================================================
// MockCustodyApi
// ============================================================================

/// Recording mock of the custody API for tests.
pub struct MockCustodyApi {
    /// Id handed out by `create_web3_connection`.
    next_id: parking_lot::Mutex<String>,
    /// Recorded create payloads.
    creates: parking_lot::Mutex<Vec<Web3ConnectionRequest>>,
    /// Recorded submit calls (id, approve).
    submits: parking_lot::Mutex<Vec<(String, bool)>>,
    /// Recorded remove calls.
    removes: parking_lot::Mutex<Vec<String>>,
    /// Error message returned by every call when set.
    fail_with: parking_lot::Mutex<Option<String>>,
}

impl Default for MockCustodyApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCustodyApi {
    pub fn new() -> Self {
        Self {
            next_id: parking_lot::Mutex::new("conn-1".to_string()),
            creates: parking_lot::Mutex::new(Vec::new()),
            submits: parking_lot::Mutex::new(Vec::new()),
            removes: parking_lot::Mutex::new(Vec::new()),
            fail_with: parking_lot::Mutex::new(None),
        }
    }

    pub fn set_next_id(&self, id: impl Into<String>) {
        *self.next_id.lock() = id.into();
    }

    pub fn set_failure(&self, message: impl Into<String>) {
        *self.fail_with.lock() = Some(message.into());
    }

    pub fn get_creates(&self) -> Vec<Web3ConnectionRequest> {
        self.creates.lock().clone()
    }

    pub fn get_submits(&self) -> Vec<(String, bool)> {
        self.submits.lock().clone()
    }

    pub fn get_removes(&self) -> Vec<String> {
        self.removes.lock().clone()
    }

    fn failure(&self) -> Option<CustodyError> {
        self.fail_with
            .lock()
            .clone()
            .map(CustodyError::HttpClient)
    }
}

impl CustodyApi for MockCustodyApi {
    fn create_web3_connection(
        &self,
        payload: Web3ConnectionRequest,
    ) -> BoxFuture<'_, CustodyResult<Web3ConnectionCreated>> {
        Box::pin(async move {
            if let Some(err) = self.failure() {
                return Err(err);
            }
            self.creates.lock().push(payload);
            Ok(Web3ConnectionCreated {
                id: self.next_id.lock().clone(),
            })
        })
    }

    fn submit_web3_connection<'a>(
        &'a self,
        id: &'a str,
        approve: bool,
    ) -> BoxFuture<'a, CustodyResult<()>> {
        Box::pin(async move {
            if let Some(err) = self.failure() {
                return Err(err);
            }
            self.submits.lock().push((id.to_string(), approve));
            Ok(())
        })
    }

    fn remove_web3_connection<'a>(&'a self, id: &'a str) -> BoxFuture<'a, CustodyResult<()>> {
        Box::pin(async move {
            if let Some(err) = self.failure() {
                return Err(err);
            }
            self.removes.lock().push(id.to_string());
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_connect_payload_wire_casing() {
        let payload = Web3ConnectionRequest::wallet_connect("wc:abc@2");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["feeLevel"], "MEDIUM");
        assert_eq!(json["vaultAccountId"], 0);
        assert_eq!(json["chainIds"], serde_json::json!(["ETH"]));
        assert_eq!(json["uri"], "wc:abc@2");
    }

    #[test]
    fn test_connections_url() {
        let client = CustodyClient::new("https://api.example.com/", "key").unwrap();
        assert_eq!(
            client.connections_url(None),
            "https://api.example.com/v1/connections/wc"
        );
        assert_eq!(
            client.connections_url(Some("abc")),
            "https://api.example.com/v1/connections/wc/abc"
        );
    }

    #[tokio::test]
    async fn test_mock_records_lifecycle() {
        let mock = MockCustodyApi::new();
        mock.set_next_id("conn-9");

        let created = mock
            .create_web3_connection(Web3ConnectionRequest::wallet_connect("wc:u@2"))
            .await
            .unwrap();
        assert_eq!(created.id, "conn-9");

        mock.submit_web3_connection("conn-9", true).await.unwrap();
        mock.remove_web3_connection("conn-9").await.unwrap();

        assert_eq!(mock.get_creates().len(), 1);
        assert_eq!(mock.get_submits(), vec![("conn-9".to_string(), true)]);
        assert_eq!(mock.get_removes(), vec!["conn-9".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_configured_failure() {
        let mock = MockCustodyApi::new();
        mock.set_failure("custody unavailable");

        let err = mock
            .create_web3_connection(Web3ConnectionRequest::wallet_connect("wc:u@2"))
            .await
            .unwrap_err();
        assert!(matches!(err, CustodyError::HttpClient(_)));
    }
}
