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
use crate::models::{AgeGroup, CreateTeam, Player, Team, UpdateTeam};
use crate::services::{StatsService, TeamMatchRecord, TeamService};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/teams", get(list_teams).post(create_team))
        .route(
            "/teams/:id",
            get(get_team).put(update_team).delete(delete_team),
        )
        .route("/teams/:id/players", get(team_players))
        .route("/teams/:id/matches/record", get(team_match_record))
}

#[derive(Debug, Deserialize)]
struct ListTeamsQuery {
    season: Option<String>,
    age_group: Option<AgeGroup>,
    limit: Option<i64>,
    offset: Option<i64>,
}

async fn list_teams(
    State(state): State<AppState>,
    Query(params): Query<ListTeamsQuery>,
) -> Result<Json<Vec<Team>>, ApiError> {
    let pagination = PaginationQuery {
        limit: params.limit,
        offset: params.offset,
    };

    let teams = TeamService::new(state.db.clone())
        .list_teams(
            params.season,
            params.age_group,
            Some(pagination.get_limit()),
            Some(pagination.get_offset()),
        )
        .await?;

    Ok(Json(teams))
}

async fn create_team(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<CreateTeam>,
) -> Result<Json<Team>, ApiError> {
    require_staff(&session)?;

    if request.name.trim().is_empty() {
        return Err(ApiError::Validation("Team name must not be empty".to_string()));
    }

    let team = TeamService::new(state.db.clone()).create_team(request).await?;
    Ok(Json(team))
}

async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<Team>, ApiError> {
    let team = TeamService::new(state.db.clone())
        .get_team_by_id(team_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(team))
}

async fn update_team(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(team_id): Path<Uuid>,
    Json(request): Json<UpdateTeam>,
) -> Result<Json<Team>, ApiError> {
    require_staff(&session)?;

    let team = TeamService::new(state.db.clone())
        .update_team(team_id, request)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(team))
}

async fn delete_team(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_staff(&session)?;

    let deleted = TeamService::new(state.db.clone()).delete_team(team_id).await?;
    if !deleted {
        return Err(ApiError::NotFound);
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}

async fn team_players(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let service = TeamService::new(state.db.clone());

    service
        .get_team_by_id(team_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let players = service.get_team_players(team_id).await?;
    Ok(Json(players))
}

#[derive(Debug, Deserialize)]
struct MatchRecordQuery {
    season: Option<String>,
}

async fn team_match_record(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
    Query(params): Query<MatchRecordQuery>,
) -> Result<Json<TeamMatchRecord>, ApiError> {
    TeamService::new(state.db.clone())
        .get_team_by_id(team_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let record = StatsService::new(state.db.clone())
        .match_record(team_id, params.season)
        .await?;

    Ok(Json(record))
}
