//! Boundary error mapping.
//!
//! Every handler error becomes a `{ "error": message }` JSON body: `400` for
//! the Not-Found and Validation families, `500` for Not-Initialized and
//! upstream failures. The wire format carries only the message text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use bridge_core::CoreError;
use bridge_custody::CustodyError;
use bridge_pairing::PairingError;
use bridge_registry::RegistryError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::NotFound(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<RegistryError> for ApiError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::SessionNotFound(_)
            | RegistryError::OrderNotFound(_)
            | RegistryError::ApprovalNotFound(_) => ApiError::NotFound(e.to_string()),
            RegistryError::Approval(inner) => inner.into(),
        }
    }
}

impl From<PairingError> for ApiError {
    fn from(e: PairingError) -> Self {
        ApiError::Upstream(e.to_string())
    }
}

impl From<CustodyError> for ApiError {
    fn from(e: CustodyError) -> Self {
        ApiError::Upstream(e.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        // Session content the bridge itself stored was unusable.
        ApiError::Upstream(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use bridge_core::{OrderId, SessionId};

    #[test]
    fn test_not_found_maps_to_400() {
        let err: ApiError = RegistryError::SessionNotFound(SessionId::from("x")).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err: ApiError = RegistryError::OrderNotFound(OrderId::from("y")).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_maps_to_500() {
        let err: ApiError = PairingError::Channel("boom".to_string()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err: ApiError = CustodyError::HttpClient("down".to_string()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_message_is_the_whole_payload() {
        let err = ApiError::Validation("Missing body params {}".to_string());
        assert_eq!(err.to_string(), "Missing body params {}");
    }
}
