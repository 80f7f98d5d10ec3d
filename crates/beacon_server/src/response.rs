//! Response and error types for the lookup routes.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use beacon_error::GatewayError;
use beacon_gateway::PresenceStatus;
use serde::Serialize;
use serde_json::json;
use tracing::error;

/// Success body: the single-key status object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusResponse {
    /// Uppercase presence label (`ONLINE`, `IDLE`, `DND`).
    pub status: PresenceStatus,
}

impl StatusResponse {
    /// Wrap a resolved status.
    pub fn new(status: PresenceStatus) -> Self {
        Self { status }
    }
}

/// Failure outcomes of a lookup request, mapped onto HTTP status codes.
///
/// Offline is deliberately a server error rather than a client error: the
/// request was well-formed and the user exists, the service just cannot
/// produce an actionable status.
#[derive(Debug)]
pub enum ApiError {
    /// The path segment was not a valid user id.
    InvalidUserId,
    /// No guild has any membership record for the user.
    UserNotFound,
    /// The user is a member somewhere but nowhere active.
    UserOffline,
    /// The gateway session failed before or during resolution.
    Gateway(GatewayError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::InvalidUserId => (StatusCode::BAD_REQUEST, "Invalid user ID"),
            ApiError::UserNotFound => (StatusCode::BAD_REQUEST, "User not found"),
            ApiError::UserOffline => (StatusCode::INTERNAL_SERVER_ERROR, "User offline"),
            ApiError::Gateway(e) => {
                // Log the real failure; the response body stays generic.
                error!(error = %e, "Gateway failure during presence lookup");
                (StatusCode::INTERNAL_SERVER_ERROR, "Gateway unavailable")
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        ApiError::Gateway(err)
    }
}
