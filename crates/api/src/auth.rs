//! Shared-secret access gate for the file routes

use std::sync::Arc;

use axum::Json;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use subtle::ConstantTimeEq;
use tracing::warn;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Access denial, always rendered as 403
#[derive(Debug)]
pub struct AccessError {
    pub code: &'static str,
    pub message: &'static str,
}

impl AccessError {
    pub fn missing() -> Self {
        Self {
            code: "API_KEY_MISSING",
            message: "Access key required",
        }
    }

    pub fn invalid() -> Self {
        Self {
            code: "API_KEY_INVALID",
            message: "Invalid access key",
        }
    }
}

impl IntoResponse for AccessError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": "forbidden",
            "code": self.code,
            "message": self.message,
        });
        (StatusCode::FORBIDDEN, Json(body)).into_response()
    }
}

#[derive(Clone)]
pub struct AccessState {
    secret: Arc<str>,
}

impl AccessState {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

/// Constant-time string comparison
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Reject requests whose `x-api-key` header does not match the configured secret
pub async fn require_secret(
    State(state): State<AccessState>,
    request: Request,
    next: Next,
) -> Result<Response, AccessError> {
    let authorized = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|key| constant_time_eq(key, &state.secret));

    match authorized {
        Some(true) => Ok(next.run(request).await),
        Some(false) => {
            warn!(method = %request.method(), uri = %request.uri(), "Rejected request with invalid access key");
            Err(AccessError::invalid())
        }
        None => {
            warn!(method = %request.method(), uri = %request.uri(), "Rejected request without access key");
            Err(AccessError::missing())
        }
    }
}
