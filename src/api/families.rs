use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::{require_staff, AppState};
use crate::auth::{UserRole, UserSession};
use crate::error::ApiError;
use crate::models::{CreateFamilyLink, ParentChildRelationship, Player};
use crate::services::FamilyService;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/parents/:id/children", get(parent_children))
        .route("/families/links", post(create_link).delete(remove_link))
        .route("/players/:id/parents", get(player_parents))
}

/// A parent sees their own children; staff can look up any parent.
async fn parent_children(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(parent_id): Path<Uuid>,
) -> Result<Json<Vec<Player>>, ApiError> {
    if session.role == UserRole::Parent && session.user_id != parent_id {
        return Err(ApiError::Forbidden);
    }
    if session.role == UserRole::Player {
        return Err(ApiError::Forbidden);
    }

    let children = FamilyService::new(state.db.clone())
        .children_of(parent_id)
        .await?;

    Ok(Json(children))
}

async fn create_link(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<CreateFamilyLink>,
) -> Result<Json<ParentChildRelationship>, ApiError> {
    require_staff(&session)?;

    let link = FamilyService::new(state.db.clone()).link(request).await?;
    Ok(Json(link))
}

#[derive(Debug, Deserialize)]
struct RemoveLinkQuery {
    parent_id: Uuid,
    player_id: Uuid,
}

async fn remove_link(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Query(params): Query<RemoveLinkQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_staff(&session)?;

    let removed = FamilyService::new(state.db.clone())
        .unlink(params.parent_id, params.player_id)
        .await?;
    if !removed {
        return Err(ApiError::NotFound);
    }

    Ok(Json(serde_json::json!({ "removed": true })))
}

async fn player_parents(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(player_id): Path<Uuid>,
) -> Result<Json<Vec<ParentChildRelationship>>, ApiError> {
    require_staff(&session)?;

    let links = FamilyService::new(state.db.clone())
        .links_for_player(player_id)
        .await?;

    Ok(Json(links))
}
