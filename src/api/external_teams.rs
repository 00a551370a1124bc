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
use crate::models::{AgeGroup, CreateExternalTeam, ExternalTeam};
use crate::services::ExternalTeamService;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/external-teams",
            get(list_external_teams).post(create_external_team),
        )
        .route(
            "/external-teams/:id",
            get(get_external_team).delete(delete_external_team),
        )
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    age_group: Option<AgeGroup>,
    limit: Option<i64>,
    offset: Option<i64>,
}

async fn list_external_teams(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<ExternalTeam>>, ApiError> {
    let pagination = PaginationQuery {
        limit: params.limit,
        offset: params.offset,
    };

    let teams = ExternalTeamService::new(state.db.clone())
        .list_external_teams(
            params.age_group,
            Some(pagination.get_limit()),
            Some(pagination.get_offset()),
        )
        .await?;

    Ok(Json(teams))
}

async fn create_external_team(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<CreateExternalTeam>,
) -> Result<Json<ExternalTeam>, ApiError> {
    require_staff(&session)?;

    if request.name.trim().is_empty() {
        return Err(ApiError::Validation(
            "Opponent name must not be empty".to_string(),
        ));
    }

    let team = ExternalTeamService::new(state.db.clone())
        .create_external_team(request)
        .await?;

    Ok(Json(team))
}

async fn get_external_team(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<ExternalTeam>, ApiError> {
    let team = ExternalTeamService::new(state.db.clone())
        .get_external_team_by_id(team_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(team))
}

async fn delete_external_team(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_staff(&session)?;

    let deleted = ExternalTeamService::new(state.db.clone())
        .delete_external_team(team_id)
        .await?;
    if !deleted {
        return Err(ApiError::NotFound);
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}
