//! Route handlers.

use axum::extract::{MatchedPath, Query, Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use bridge_core::{OrderId, SessionId, EIP155_NAMESPACE};
use bridge_custody::Web3ConnectionRequest;
use bridge_pairing::{ProposalNamespaces, SessionDisconnect, DEFAULT_TRANSFER_VALUE_WEI};
use bridge_telemetry::metrics::{HTTP_RESPONSES_TOTAL, TRANSFER_DISPATCHES_TOTAL};

use crate::error::ApiError;
use crate::state::AppState;

/// Create the axum router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/connect", get(connect))
        .route("/approve", get(approve))
        .route("/disconnect", post(disconnect))
        .route("/send", post(send))
        .route("/get-account", get(get_account))
        .route("/create-order", post(create_order))
        .route("/cancel-order", post(cancel_order))
        .route("/metrics", get(metrics))
        .route("/healthz", get(healthz))
        .layer(middleware::from_fn(track_responses))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Count responses per matched route and status.
async fn track_responses(request: Request, next: Next) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    HTTP_RESPONSES_TOTAL
        .with_label_values(&[&route, response.status().as_str()])
        .inc();
    response
}

#[derive(Debug, Serialize)]
struct ConnectResponse {
    id: SessionId,
    uri: String,
}

/// Initiate a pairing: propose namespaces to the pairing layer, mirror the
/// pairing URI into a custody web3 connection, approve that connection, and
/// park the wallet-side approval for `/approve` to resolve.
async fn connect(State(state): State<AppState>) -> Result<Json<ConnectResponse>, ApiError> {
    let namespaces = ProposalNamespaces::eip155(&state.config.chain_id);
    let handshake = state.pairing.connect(namespaces).await?;

    let payload = Web3ConnectionRequest::wallet_connect(&handshake.uri);
    let created = state.custody.create_web3_connection(payload).await?;
    state
        .custody
        .submit_web3_connection(&created.id, true)
        .await?;

    let id = SessionId::from(created.id);
    state.approvals.register(id.clone(), handshake.approval);
    info!(%id, "Pairing proposed, awaiting wallet approval");

    Ok(Json(ConnectResponse {
        id,
        uri: handshake.uri,
    }))
}

#[derive(Debug, Deserialize)]
struct IdQuery {
    id: String,
}

/// Resolve a pending pairing approval into a stored session.
async fn approve(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<Value>, ApiError> {
    let id = SessionId::from(query.id);
    let session = state.approvals.resolve(&id, &state.sessions).await?;
    Ok(Json(json!({ "session": session })))
}

/// Tear down a session: disconnect the pairing topic, remove the custody
/// connection, drop the session record, and cancel its recurring orders
/// (or every order, when the legacy flag is set).
async fn disconnect(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let id = require_str(&body, "id")?;
    let id = SessionId::from(id);
    let session = state.sessions.get(&id)?;

    state
        .pairing
        .disconnect(SessionDisconnect::user(&session.topic))
        .await?;
    state.custody.remove_web3_connection(id.as_str()).await?;
    state.sessions.remove(&id);

    let cancelled = if state.config.clear_all_orders_on_disconnect {
        state.orders.clear_all()
    } else {
        state.orders.remove_for_session(&id)
    };
    info!(%id, cancelled, "Session disconnected");

    Ok(Json(json!({ "success": true })))
}

/// One-shot transfer of the default amount over a session.
async fn send(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let id = SessionId::from(require_str(&body, "id")?);
    let to = require_str(&body, "to")?;

    let session = state.sessions.get(&id)?;
    let from = match body.get("from").and_then(Value::as_str) {
        Some(from) => from.to_string(),
        None => session.signing_address(EIP155_NAMESPACE)?.to_string(),
    };

    let result = state
        .dispatcher
        .send(&session, &from, &to, DEFAULT_TRANSFER_VALUE_WEI)
        .await;
    let outcome = if result.is_ok() { "ok" } else { "error" };
    TRANSFER_DISPATCHES_TOTAL
        .with_label_values(&[outcome])
        .inc();

    Ok(Json(json!({ "txHash": result? })))
}

/// Bare signing address of a session's first eip155 account.
async fn get_account(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<Value>, ApiError> {
    let id = SessionId::from(query.id);
    let session = state.sessions.get(&id)?;
    let account = session.signing_address(EIP155_NAMESPACE)?;
    Ok(Json(json!({ "account": account })))
}

/// Install a recurring transfer order for a session.
async fn create_order(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let id = require_str(&body, "id")?;
    let value = require_str(&body, "value")?;
    let to = require_str(&body, "to")?;

    let order_id = state
        .scheduler
        .create_order(SessionId::from(id), to, value);
    Ok(Json(json!({ "orderId": order_id })))
}

/// Cancel a recurring transfer order.
async fn cancel_order(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    require_str(&body, "id")?;
    let order_id = OrderId::from(require_str(&body, "orderId")?);

    state.orders.cancel(&order_id)?;
    info!(%order_id, "Order cancelled");
    Ok(Json(json!({ "success": true })))
}

async fn metrics() -> String {
    bridge_telemetry::metrics::render()
}

async fn healthz() -> &'static str {
    "ok"
}

/// Presence check on a JSON body field; reports the whole payload back so a
/// caller can see which shape was rejected.
fn require_str(body: &Value, field: &str) -> Result<String, ApiError> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::Validation(format!("Missing body params {body}")))
}
