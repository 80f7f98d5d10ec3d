//! HTTP routes for presence lookups.

use crate::metrics::LookupMetrics;
use crate::request::UserQuery;
use crate::response::{ApiError, StatusResponse};
use crate::service::PresenceService;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use beacon_gateway::{Resolution, UserId};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// API state shared by every route handler.
#[derive(Clone)]
pub struct ApiState {
    service: Arc<dyn PresenceService>,
    metrics: Arc<LookupMetrics>,
}

impl ApiState {
    /// Creates new API state.
    pub fn new(service: Arc<dyn PresenceService>, metrics: Arc<LookupMetrics>) -> Self {
        Self { service, metrics }
    }
}

/// Creates the presence API router.
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/check-status", post(check_status))
        .route("/health", get(health_check))
        .route("/metrics", get(get_metrics))
        .route("/:user_id", get(check_status_from_path))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Get current metrics snapshot.
async fn get_metrics(State(state): State<ApiState>) -> impl IntoResponse {
    let snapshot = state.metrics.snapshot();
    (StatusCode::OK, Json(snapshot))
}

/// Look up a user's presence from a JSON body.
async fn check_status(
    State(state): State<ApiState>,
    Json(query): Json<UserQuery>,
) -> Result<Json<StatusResponse>, ApiError> {
    // A zero snowflake cannot exist; skip the resolver entirely.
    let Some(user_id) = snowflake(query.user_id) else {
        return Err(ApiError::UserNotFound);
    };
    lookup(&state, user_id).await
}

/// Look up a user's presence from a path segment.
async fn check_status_from_path(
    State(state): State<ApiState>,
    Path(raw): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    let user_id = raw
        .parse::<u64>()
        .ok()
        .and_then(snowflake)
        .ok_or_else(|| {
            debug!(%raw, "Rejected non-snowflake path segment");
            ApiError::InvalidUserId
        })?;
    lookup(&state, user_id).await
}

fn snowflake(raw: u64) -> Option<UserId> {
    (raw != 0).then(|| UserId::new(raw))
}

async fn lookup(state: &ApiState, user_id: UserId) -> Result<Json<StatusResponse>, ApiError> {
    state.metrics.record_lookup();
    match state.service.check(user_id).await {
        Ok(Resolution::Active(member)) => {
            state.metrics.record_active();
            Ok(Json(StatusResponse::new(*member.status())))
        }
        Ok(Resolution::Offline(_)) => {
            state.metrics.record_offline();
            Err(ApiError::UserOffline)
        }
        Ok(Resolution::NotFound) => {
            state.metrics.record_not_found();
            Err(ApiError::UserNotFound)
        }
        Err(e) => {
            state.metrics.record_gateway_failure();
            Err(ApiError::Gateway(e))
        }
    }
}
