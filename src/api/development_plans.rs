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
use crate::models::{
    CreateDevelopmentPlan, DevelopmentPlan, PlanStatus, PrivacyCategory, UpdateDevelopmentPlan,
};
use crate::services::{DevelopmentPlanService, FamilyService};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/development-plans",
            get(list_plans).post(create_plan),
        )
        .route(
            "/development-plans/:id",
            get(get_plan).put(update_plan).delete(delete_plan),
        )
}

#[derive(Debug, Deserialize)]
struct ListPlansQuery {
    player_id: Option<Uuid>,
    status: Option<PlanStatus>,
    limit: Option<i64>,
    offset: Option<i64>,
}

async fn list_plans(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Query(params): Query<ListPlansQuery>,
) -> Result<Json<Vec<DevelopmentPlan>>, ApiError> {
    if session.role == UserRole::Parent {
        let player_id = params.player_id.ok_or(ApiError::Forbidden)?;
        FamilyService::new(state.db.clone())
            .ensure_can_view(&session, player_id, PrivacyCategory::Development)
            .await?;
    } else {
        require_staff(&session)?;
    }

    let pagination = PaginationQuery {
        limit: params.limit,
        offset: params.offset,
    };

    let plans = DevelopmentPlanService::new(state.db.clone())
        .list_plans(
            params.player_id,
            params.status,
            Some(pagination.get_limit()),
            Some(pagination.get_offset()),
        )
        .await?;

    Ok(Json(plans))
}

async fn create_plan(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<CreateDevelopmentPlan>,
) -> Result<Json<DevelopmentPlan>, ApiError> {
    require_staff(&session)?;

    if request.goal.trim().is_empty() {
        return Err(ApiError::Validation("Goal must not be empty".to_string()));
    }

    let plan = DevelopmentPlanService::new(state.db.clone())
        .create_plan(request)
        .await?;

    Ok(Json(plan))
}

async fn get_plan(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<DevelopmentPlan>, ApiError> {
    let plan = DevelopmentPlanService::new(state.db.clone())
        .get_plan_by_id(plan_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    if require_staff(&session).is_err() {
        FamilyService::new(state.db.clone())
            .ensure_can_view(&session, plan.player_id, PrivacyCategory::Development)
            .await?;
    }

    Ok(Json(plan))
}

async fn update_plan(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(plan_id): Path<Uuid>,
    Json(request): Json<UpdateDevelopmentPlan>,
) -> Result<Json<DevelopmentPlan>, ApiError> {
    require_staff(&session)?;

    if let Some(pct) = request.progress_pct {
        if !(0..=100).contains(&pct) {
            return Err(ApiError::Validation(
                "Progress must be between 0 and 100".to_string(),
            ));
        }
    }

    let plan = DevelopmentPlanService::new(state.db.clone())
        .update_plan(plan_id, request)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(plan))
}

async fn delete_plan(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_staff(&session)?;

    let deleted = DevelopmentPlanService::new(state.db.clone())
        .delete_plan(plan_id)
        .await?;
    if !deleted {
        return Err(ApiError::NotFound);
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}
