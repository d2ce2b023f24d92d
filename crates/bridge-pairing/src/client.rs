//! Pairing client trait and implementations.
//!
//! Trait-based abstraction over the wallet pairing library. This allows:
//! - Dependency injection for testing
//! - Separation of bridge logic from the pairing transport

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use bridge_core::PairingSession;

use crate::error::{PairingError, PairingResult};
use crate::types::{ProposalNamespaces, SessionDisconnect, SessionRequest};

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Deferred pairing approval: resolves once the wallet approves the proposal.
pub type ApprovalFuture = BoxFuture<'static, PairingResult<PairingSession>>;

/// Result of initiating a pairing.
pub struct Handshake {
    /// Pairing URI the wallet scans or opens.
    pub uri: String,
    /// Deferred completion for the wallet-side approval.
    pub approval: ApprovalFuture,
}

/// A pairing-layer event notice (logged only, no handling logic).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum PairingEvent {
    SessionUpdate(serde_json::Value),
    SessionRequest(serde_json::Value),
    SessionDelete(serde_json::Value),
}

/// Trait for the pairing channel.
///
/// Mirrors the pairing library's public contract: connect with required
/// namespaces, issue signing requests over a topic, disconnect a topic, and
/// receive session events.
pub trait PairingClient: Send + Sync {
    /// Initiate a pairing proposal.
    fn connect(&self, namespaces: ProposalNamespaces) -> BoxFuture<'_, PairingResult<Handshake>>;

    /// Issue a signing request over an approved session.
    ///
    /// The result is whatever the signer returns, verbatim. No timeout is
    /// enforced; a hung signing call stalls only the calling task.
    fn request(&self, request: SessionRequest) -> BoxFuture<'_, PairingResult<serde_json::Value>>;

    /// Tear down a pairing session.
    fn disconnect(&self, disconnect: SessionDisconnect) -> BoxFuture<'_, PairingResult<()>>;

    /// Long-poll the next batch of pairing events.
    fn events(&self) -> BoxFuture<'_, PairingResult<Vec<PairingEvent>>>;
}

/// Arc wrapper for PairingClient trait objects.
pub type DynPairingClient = Arc<dyn PairingClient>;

// ============================================================================
// HttpPairingClient
// ============================================================================

/// Timeout for pairing management calls (connect/disconnect).
///
/// Approval, signing, and event calls are deliberately unbounded: they wait
/// on a human holding a wallet.
const MANAGEMENT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConnectRequest {
    required_namespaces: ProposalNamespaces,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConnectResponse {
    uri: String,
    approval_id: String,
}

/// Gateway wire shape of a signing request: the envelope the pairing library
/// takes, with method/params nested under `request`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RpcEnvelope<'a> {
    topic: &'a str,
    request: RpcCall<'a>,
    chain_id: &'a str,
}

#[derive(Debug, Serialize)]
struct RpcCall<'a> {
    method: &'a str,
    params: &'a serde_json::Value,
}

/// Pairing client speaking to a sign-client gateway over HTTP/JSON.
///
/// The gateway hosts the actual pairing protocol library and exposes its
/// public call contract: `POST /connect`, `GET /approval/{id}` (long poll),
/// `POST /request`, `POST /disconnect`, `GET /events` (long poll).
pub struct HttpPairingClient {
    /// Client for management calls, bounded by `MANAGEMENT_TIMEOUT`.
    management: reqwest::Client,
    /// Client for approval/signing/event calls, unbounded.
    signing: reqwest::Client,
    /// Gateway base URL.
    base_url: String,
}

impl HttpPairingClient {
    /// Create a new gateway client.
    pub fn new(base_url: impl Into<String>) -> PairingResult<Self> {
        let base_url = base_url.into();
        if base_url.is_empty() {
            return Err(PairingError::NotInitialized);
        }

        let management = reqwest::Client::builder()
            .timeout(MANAGEMENT_TIMEOUT)
            .build()
            .map_err(|e| PairingError::Channel(format!("Failed to create HTTP client: {e}")))?;
        let signing = reqwest::Client::builder()
            .build()
            .map_err(|e| PairingError::Channel(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            management,
            signing,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        client: &reqwest::Client,
        url: String,
        body: &impl Serialize,
    ) -> PairingResult<T> {
        let response = client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| PairingError::Channel(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PairingError::Channel(format!("HTTP {status}: {body}")));
        }

        response
            .json()
            .await
            .map_err(|e| PairingError::Channel(format!("Failed to parse response: {e}")))
    }
}

impl PairingClient for HttpPairingClient {
    fn connect(&self, namespaces: ProposalNamespaces) -> BoxFuture<'_, PairingResult<Handshake>> {
        Box::pin(async move {
            let url = format!("{}/connect", self.base_url);
            let response: ConnectResponse = Self::post_json(
                &self.management,
                url,
                &ConnectRequest {
                    required_namespaces: namespaces,
                },
            )
            .await?;

            debug!(approval_id = %response.approval_id, "Pairing proposal created");

            // The approval long-poll outlives this borrow; clone what it needs.
            let client = self.signing.clone();
            let approval_url = format!("{}/approval/{}", self.base_url, response.approval_id);
            let approval: ApprovalFuture = Box::pin(async move {
                let resp = client
                    .get(&approval_url)
                    .send()
                    .await
                    .map_err(|e| PairingError::Approval(format!("HTTP request failed: {e}")))?;
                let status = resp.status();
                if !status.is_success() {
                    let body = resp.text().await.unwrap_or_default();
                    return Err(PairingError::Approval(format!("HTTP {status}: {body}")));
                }
                resp.json::<PairingSession>()
                    .await
                    .map_err(|e| PairingError::Approval(format!("Failed to parse session: {e}")))
            });

            Ok(Handshake {
                uri: response.uri,
                approval,
            })
        })
    }

    fn request(&self, request: SessionRequest) -> BoxFuture<'_, PairingResult<serde_json::Value>> {
        Box::pin(async move {
            let url = format!("{}/request", self.base_url);
            let envelope = RpcEnvelope {
                topic: &request.topic,
                request: RpcCall {
                    method: &request.method,
                    params: &request.params,
                },
                chain_id: &request.chain_id,
            };
            Self::post_json(&self.signing, url, &envelope).await
        })
    }

    fn disconnect(&self, disconnect: SessionDisconnect) -> BoxFuture<'_, PairingResult<()>> {
        Box::pin(async move {
            let url = format!("{}/disconnect", self.base_url);
            let _: serde_json::Value = Self::post_json(&self.management, url, &disconnect).await?;
            Ok(())
        })
    }

    fn events(&self) -> BoxFuture<'_, PairingResult<Vec<PairingEvent>>> {
        Box::pin(async move {
            let url = format!("{}/events", self.base_url);
            let response = self
                .signing
                .get(&url)
                .send()
                .await
                .map_err(|e| PairingError::Channel(format!("HTTP request failed: {e}")))?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(PairingError::Channel(format!("HTTP {status}: {body}")));
            }
            response
                .json()
                .await
                .map_err(|e| PairingError::Channel(format!("Failed to parse events: {e}")))
        })
    }
}

// ============================================================================
// MockPairingClient
// ============================================================================

/// Mock pairing client for testing.
///
/// Records every signing request and disconnect; `connect` hands out a
/// configured URI and an approval resolving to the configured session.
pub struct MockPairingClient {
    /// URI returned by `connect`.
    uri: parking_lot::Mutex<String>,
    /// Session the approval future resolves to (None => approval fails).
    approval_session: parking_lot::Mutex<Option<PairingSession>>,
    /// Result returned by `request`: Ok(value) or Err(message).
    next_request_result: parking_lot::Mutex<Result<serde_json::Value, String>>,
    /// Recorded signing requests.
    requests: parking_lot::Mutex<Vec<SessionRequest>>,
    /// Recorded disconnects.
    disconnects: parking_lot::Mutex<Vec<SessionDisconnect>>,
}

impl Default for MockPairingClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPairingClient {
    /// Create a new mock with an empty URI and a null request result.
    pub fn new() -> Self {
        Self {
            uri: parking_lot::Mutex::new("wc:mock-pairing-uri@2".to_string()),
            approval_session: parking_lot::Mutex::new(None),
            next_request_result: parking_lot::Mutex::new(Ok(serde_json::Value::Null)),
            requests: parking_lot::Mutex::new(Vec::new()),
            disconnects: parking_lot::Mutex::new(Vec::new()),
        }
    }

    /// Set the URI returned by `connect`.
    pub fn set_uri(&self, uri: impl Into<String>) {
        *self.uri.lock() = uri.into();
    }

    /// Set the session the approval future resolves to.
    pub fn set_approval_session(&self, session: PairingSession) {
        *self.approval_session.lock() = Some(session);
    }

    /// Set the result returned by `request`.
    pub fn set_next_request_result(&self, result: Result<serde_json::Value, String>) {
        *self.next_request_result.lock() = result;
    }

    /// Get recorded signing requests.
    pub fn get_requests(&self) -> Vec<SessionRequest> {
        self.requests.lock().clone()
    }

    /// Get recorded disconnects.
    pub fn get_disconnects(&self) -> Vec<SessionDisconnect> {
        self.disconnects.lock().clone()
    }
}

impl PairingClient for MockPairingClient {
    fn connect(&self, _namespaces: ProposalNamespaces) -> BoxFuture<'_, PairingResult<Handshake>> {
        let uri = self.uri.lock().clone();
        let session = self.approval_session.lock().clone();
        Box::pin(async move {
            let approval: ApprovalFuture = Box::pin(async move {
                session.ok_or_else(|| PairingError::Approval("no session configured".to_string()))
            });
            Ok(Handshake { uri, approval })
        })
    }

    fn request(&self, request: SessionRequest) -> BoxFuture<'_, PairingResult<serde_json::Value>> {
        Box::pin(async move {
            self.requests.lock().push(request);
            self.next_request_result
                .lock()
                .clone()
                .map_err(PairingError::Channel)
        })
    }

    fn disconnect(&self, disconnect: SessionDisconnect) -> BoxFuture<'_, PairingResult<()>> {
        Box::pin(async move {
            self.disconnects.lock().push(disconnect);
            Ok(())
        })
    }

    fn events(&self) -> BoxFuture<'_, PairingResult<Vec<PairingEvent>>> {
        Box::pin(async move { Ok(Vec::new()) })
    }
}
