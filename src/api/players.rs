use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::{require_staff, AppState, PaginationQuery};
use crate::auth::UserSession;
use crate::error::ApiError;
use crate::models::{
    Attendance, CreatePlayer, FamilyPrivacySettings, Player, PlayerStatus, PrivacyCategory,
    UpdatePlayer, UpdatePrivacySettings,
};
use crate::services::{AttendanceService, FamilyService, PlayerService};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/players", get(list_players).post(create_player))
        .route(
            "/players/:id",
            get(get_player).put(update_player).delete(deactivate_player),
        )
        .route("/players/:id/attendance", get(player_attendance))
        .route(
            "/players/:id/privacy",
            get(get_privacy).put(update_privacy),
        )
}

#[derive(Debug, Deserialize)]
struct ListPlayersQuery {
    team_id: Option<Uuid>,
    status: Option<PlayerStatus>,
    name: Option<String>,
    limit: Option<i64>,
    offset: Option<i64>,
}

async fn list_players(
    State(state): State<AppState>,
    Query(params): Query<ListPlayersQuery>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let pagination = PaginationQuery {
        limit: params.limit,
        offset: params.offset,
    };

    let players = PlayerService::new(state.db.clone())
        .list_players(
            params.team_id,
            params.status,
            params.name,
            Some(pagination.get_limit()),
            Some(pagination.get_offset()),
        )
        .await?;

    Ok(Json(players))
}

async fn create_player(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<CreatePlayer>,
) -> Result<Json<Player>, ApiError> {
    require_staff(&session)?;

    if request.first_name.trim().is_empty() || request.last_name.trim().is_empty() {
        return Err(ApiError::Validation(
            "Player name must not be empty".to_string(),
        ));
    }

    let player = PlayerService::new(state.db.clone())
        .create_player(request)
        .await?;

    Ok(Json(player))
}

async fn get_player(
    State(state): State<AppState>,
    Path(player_id): Path<Uuid>,
) -> Result<Json<Player>, ApiError> {
    let player = PlayerService::new(state.db.clone())
        .get_player_by_id(player_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(player))
}

async fn update_player(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(player_id): Path<Uuid>,
    Json(request): Json<UpdatePlayer>,
) -> Result<Json<Player>, ApiError> {
    require_staff(&session)?;

    let player = PlayerService::new(state.db.clone())
        .update_player(player_id, request)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(player))
}

/// Roster rows are never hard-deleted, the player is set inactive.
async fn deactivate_player(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(player_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_staff(&session)?;

    let deactivated = PlayerService::new(state.db.clone())
        .deactivate_player(player_id)
        .await?;
    if !deactivated {
        return Err(ApiError::NotFound);
    }

    Ok(Json(serde_json::json!({ "deactivated": true })))
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    limit: Option<i64>,
    offset: Option<i64>,
}

/// Attendance history; parents only get it while the family shares it.
async fn player_attendance(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(player_id): Path<Uuid>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<Attendance>>, ApiError> {
    PlayerService::new(state.db.clone())
        .get_player_by_id(player_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    FamilyService::new(state.db.clone())
        .ensure_can_view(&session, player_id, PrivacyCategory::Attendance)
        .await?;

    let pagination = PaginationQuery {
        limit: params.limit,
        offset: params.offset,
    };

    let history = AttendanceService::new(state.db.clone())
        .player_history(
            player_id,
            Some(pagination.get_limit()),
            Some(pagination.get_offset()),
        )
        .await?;

    Ok(Json(history))
}

async fn get_privacy(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(player_id): Path<Uuid>,
) -> Result<Json<FamilyPrivacySettings>, ApiError> {
    let family_service = FamilyService::new(state.db.clone());

    if require_staff(&session).is_err()
        && !family_service.parent_of(session.user_id, player_id).await?
    {
        return Err(ApiError::Forbidden);
    }

    let settings = family_service.privacy_settings(player_id).await?;
    Ok(Json(settings))
}

/// Privacy flags are the family's call: linked parents and admins only.
async fn update_privacy(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(player_id): Path<Uuid>,
    Json(request): Json<UpdatePrivacySettings>,
) -> Result<Json<FamilyPrivacySettings>, ApiError> {
    let family_service = FamilyService::new(state.db.clone());

    let is_admin = session.role == crate::auth::UserRole::Admin;
    if !is_admin && !family_service.parent_of(session.user_id, player_id).await? {
        return Err(ApiError::Forbidden);
    }

    let settings = family_service.update_privacy(player_id, request).await?;
    Ok(Json(settings))
}
