use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::{require_staff, AppState, PaginationQuery};
use crate::auth::{UserRole, UserSession};
use crate::error::ApiError;
use crate::models::{CreateInjury, Injury, InjuryStatus, PrivacyCategory, UpdateInjury};
use crate::services::{FamilyService, InjuryService};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/injuries", get(list_injuries).post(create_injury))
        .route(
            "/injuries/:id",
            get(get_injury).put(update_injury).delete(delete_injury),
        )
}

#[derive(Debug, Deserialize)]
struct ListInjuriesQuery {
    player_id: Option<Uuid>,
    status: Option<InjuryStatus>,
    limit: Option<i64>,
    offset: Option<i64>,
}

/// Medical records. Staff see everything, a parent only their own child
/// and only while the family shares medical data.
async fn list_injuries(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Query(params): Query<ListInjuriesQuery>,
) -> Result<Json<Vec<Injury>>, ApiError> {
    if session.role == UserRole::Parent {
        let player_id = params.player_id.ok_or(ApiError::Forbidden)?;
        FamilyService::new(state.db.clone())
            .ensure_can_view(&session, player_id, PrivacyCategory::Medical)
            .await?;
    } else {
        require_staff(&session)?;
    }

    let pagination = PaginationQuery {
        limit: params.limit,
        offset: params.offset,
    };

    let injuries = InjuryService::new(state.db.clone())
        .list_injuries(
            params.player_id,
            params.status,
            Some(pagination.get_limit()),
            Some(pagination.get_offset()),
        )
        .await?;

    Ok(Json(injuries))
}

async fn create_injury(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<CreateInjury>,
) -> Result<Json<Injury>, ApiError> {
    require_staff(&session)?;

    let injury = InjuryService::new(state.db.clone())
        .create_injury(request)
        .await?;

    Ok(Json(injury))
}

async fn get_injury(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(injury_id): Path<Uuid>,
) -> Result<Json<Injury>, ApiError> {
    let injury = InjuryService::new(state.db.clone())
        .get_injury_by_id(injury_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    if require_staff(&session).is_err() {
        FamilyService::new(state.db.clone())
            .ensure_can_view(&session, injury.player_id, PrivacyCategory::Medical)
            .await?;
    }

    Ok(Json(injury))
}

async fn update_injury(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(injury_id): Path<Uuid>,
    Json(request): Json<UpdateInjury>,
) -> Result<Json<Injury>, ApiError> {
    require_staff(&session)?;

    let injury = InjuryService::new(state.db.clone())
        .update_injury(injury_id, request)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(injury))
}

async fn delete_injury(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(injury_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_staff(&session)?;

    let deleted = InjuryService::new(state.db.clone())
        .delete_injury(injury_id)
        .await?;
    if !deleted {
        return Err(ApiError::NotFound);
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}
