use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::{require_staff, AppState};
use crate::auth::UserSession;
use crate::error::ApiError;
use crate::services::{
    AttendanceSummary, InjuredPlayer, SquadSize, StatsService, TeamPlanProgress,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stats/squads", get(squad_sizes))
        .route("/stats/teams/:id/attendance", get(attendance_summary))
        .route("/stats/injuries/current", get(current_injuries))
        .route("/stats/development", get(development_progress))
}

#[derive(Debug, Deserialize)]
struct SquadQuery {
    season: String,
}

async fn squad_sizes(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Query(params): Query<SquadQuery>,
) -> Result<Json<Vec<SquadSize>>, ApiError> {
    require_staff(&session)?;

    let sizes = StatsService::new(state.db.clone())
        .squad_sizes(&params.season)
        .await?;

    Ok(Json(sizes))
}

#[derive(Debug, Deserialize)]
struct AttendanceWindowQuery {
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
}

async fn attendance_summary(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(team_id): Path<Uuid>,
    Query(params): Query<AttendanceWindowQuery>,
) -> Result<Json<AttendanceSummary>, ApiError> {
    require_staff(&session)?;

    // Default window: the last 90 days.
    let to = params.to.unwrap_or_else(Utc::now);
    let from = params.from.unwrap_or(to - Duration::days(90));
    if from >= to {
        return Err(ApiError::Validation(
            "Window start must precede its end".to_string(),
        ));
    }

    let summary = StatsService::new(state.db.clone())
        .attendance_summary(team_id, from, to)
        .await?;

    Ok(Json(summary))
}

async fn current_injuries(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<Vec<InjuredPlayer>>, ApiError> {
    require_staff(&session)?;

    let injuries = StatsService::new(state.db.clone())
        .current_injuries()
        .await?;

    Ok(Json(injuries))
}

#[derive(Debug, Deserialize)]
struct DevelopmentQuery {
    season: Option<String>,
}

async fn development_progress(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Query(params): Query<DevelopmentQuery>,
) -> Result<Json<Vec<TeamPlanProgress>>, ApiError> {
    require_staff(&session)?;

    let progress = StatsService::new(state.db.clone())
        .development_progress(params.season)
        .await?;

    Ok(Json(progress))
}
