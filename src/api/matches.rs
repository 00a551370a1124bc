use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::{require_staff, AppState, PaginationQuery};
use crate::auth::UserSession;
use crate::error::ApiError;
use crate::models::{CreateMatch, Match, MatchResult, UpdateMatch};
use crate::services::MatchService;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/matches", get(list_matches).post(create_match))
        .route(
            "/matches/:id",
            get(get_match).put(update_match).delete(delete_match),
        )
        .route("/matches/:id/result", post(record_result))
}

#[derive(Debug, Deserialize)]
struct ListMatchesQuery {
    team_id: Option<Uuid>,
    season: Option<String>,
    played: Option<bool>,
    limit: Option<i64>,
    offset: Option<i64>,
}

async fn list_matches(
    State(state): State<AppState>,
    Query(params): Query<ListMatchesQuery>,
) -> Result<Json<Vec<Match>>, ApiError> {
    let pagination = PaginationQuery {
        limit: params.limit,
        offset: params.offset,
    };

    let matches = MatchService::new(state.db.clone())
        .list_matches(
            params.team_id,
            params.season,
            params.played,
            Some(pagination.get_limit()),
            Some(pagination.get_offset()),
        )
        .await?;

    Ok(Json(matches))
}

async fn create_match(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<CreateMatch>,
) -> Result<Json<Match>, ApiError> {
    require_staff(&session)?;

    let fixture = MatchService::new(state.db.clone())
        .create_match(request)
        .await?;

    Ok(Json(fixture))
}

async fn get_match(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<Json<Match>, ApiError> {
    let fixture = MatchService::new(state.db.clone())
        .get_match_by_id(match_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(fixture))
}

async fn update_match(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(match_id): Path<Uuid>,
    Json(request): Json<UpdateMatch>,
) -> Result<Json<Match>, ApiError> {
    require_staff(&session)?;

    let fixture = MatchService::new(state.db.clone())
        .update_match(match_id, request)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(fixture))
}

/// Record the final score of a played fixture.
async fn record_result(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(match_id): Path<Uuid>,
    Json(request): Json<MatchResult>,
) -> Result<Json<Match>, ApiError> {
    require_staff(&session)?;

    if request.goals_for < 0 || request.goals_against < 0 {
        return Err(ApiError::Validation(
            "Goals must be non-negative".to_string(),
        ));
    }

    let fixture = MatchService::new(state.db.clone())
        .record_result(match_id, request)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(fixture))
}

async fn delete_match(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(match_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_staff(&session)?;

    let deleted = MatchService::new(state.db.clone())
        .delete_match(match_id)
        .await?;
    if !deleted {
        return Err(ApiError::NotFound);
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}
