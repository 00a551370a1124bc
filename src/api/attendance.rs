use axum::{
    extract::{Path, State},
    response::Json,
    Extension, Router,
};
use chrono::Utc;
use uuid::Uuid;

use crate::api::{require_staff, AppState};
use crate::auth::UserSession;
use crate::error::ApiError;
use crate::models::{CheckinRequest, CheckinResponse};
use crate::services::CheckinService;

/// The scan endpoint is deliberately outside the login wall: the kiosk
/// tablet in the gym holds no credentials, the short-lived token is the
/// authorization.
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/attendance/checkin", axum::routing::post(qr_check_in))
}

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/checkin-sessions/:token",
        axum::routing::delete(revoke_checkin_session),
    )
}

async fn qr_check_in(
    State(state): State<AppState>,
    Json(request): Json<CheckinRequest>,
) -> Result<Json<CheckinResponse>, ApiError> {
    let response = CheckinService::new(state.db.clone())
        .check_in(request.token, request.player_id, Utc::now())
        .await?;

    Ok(Json(response))
}

async fn revoke_checkin_session(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(token): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_staff(&session)?;

    let revoked = CheckinService::new(state.db.clone())
        .revoke_session(token)
        .await?;
    if !revoked {
        return Err(ApiError::NotFound);
    }

    Ok(Json(serde_json::json!({ "revoked": true })))
}
