use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{require_staff, AppState, PaginationQuery};
use crate::auth::UserSession;
use crate::error::ApiError;
use crate::models::{
    Attendance, CheckinPayload, CreateTraining, RecordAttendanceSheet, Training, UpdateTraining,
};
use crate::services::{AttendanceService, CheckinService, TrainingService};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/trainings", get(list_trainings).post(create_training))
        .route(
            "/trainings/:id",
            get(get_training).put(update_training).delete(delete_training),
        )
        .route(
            "/trainings/:id/attendance",
            get(get_attendance_sheet).post(record_attendance_sheet),
        )
        .route("/trainings/:id/checkin-session", post(open_checkin_session))
}

#[derive(Debug, Deserialize)]
struct ListTrainingsQuery {
    team_id: Option<Uuid>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
    limit: Option<i64>,
    offset: Option<i64>,
}

async fn list_trainings(
    State(state): State<AppState>,
    Query(params): Query<ListTrainingsQuery>,
) -> Result<Json<Vec<Training>>, ApiError> {
    let pagination = PaginationQuery {
        limit: params.limit,
        offset: params.offset,
    };

    let trainings = TrainingService::new(state.db.clone())
        .list_trainings(
            params.team_id,
            params.from,
            params.to,
            Some(pagination.get_limit()),
            Some(pagination.get_offset()),
        )
        .await?;

    Ok(Json(trainings))
}

async fn create_training(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<CreateTraining>,
) -> Result<Json<Training>, ApiError> {
    require_staff(&session)?;

    if request.ends_at <= request.starts_at {
        return Err(ApiError::Validation(
            "Training must end after it starts".to_string(),
        ));
    }

    let training = TrainingService::new(state.db.clone())
        .create_training(request)
        .await?;

    Ok(Json(training))
}

async fn get_training(
    State(state): State<AppState>,
    Path(training_id): Path<Uuid>,
) -> Result<Json<Training>, ApiError> {
    let training = TrainingService::new(state.db.clone())
        .get_training_by_id(training_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(training))
}

async fn update_training(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(training_id): Path<Uuid>,
    Json(request): Json<UpdateTraining>,
) -> Result<Json<Training>, ApiError> {
    require_staff(&session)?;

    let training = TrainingService::new(state.db.clone())
        .update_training(training_id, request)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(training))
}

async fn delete_training(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(training_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_staff(&session)?;

    let deleted = TrainingService::new(state.db.clone())
        .delete_training(training_id)
        .await?;
    if !deleted {
        return Err(ApiError::NotFound);
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Full attendance sheet of one training (staff view).
async fn get_attendance_sheet(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(training_id): Path<Uuid>,
) -> Result<Json<Vec<Attendance>>, ApiError> {
    require_staff(&session)?;

    TrainingService::new(state.db.clone())
        .get_training_by_id(training_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let sheet = AttendanceService::new(state.db.clone())
        .sheet_for_training(training_id)
        .await?;

    Ok(Json(sheet))
}

/// The coach submits the whole sheet at once; lines upsert.
async fn record_attendance_sheet(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(training_id): Path<Uuid>,
    Json(request): Json<RecordAttendanceSheet>,
) -> Result<Json<Vec<Attendance>>, ApiError> {
    require_staff(&session)?;

    TrainingService::new(state.db.clone())
        .get_training_by_id(training_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let records = AttendanceService::new(state.db.clone())
        .record_sheet(training_id, request.entries)
        .await?;

    Ok(Json(records))
}

#[derive(Debug, Serialize)]
struct CheckinSessionResponse {
    token: Uuid,
    expires_at: DateTime<Utc>,
    /// JSON the frontend renders as a QR image.
    payload: CheckinPayload,
}

/// Open a QR check-in window for a training.
async fn open_checkin_session(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(training_id): Path<Uuid>,
) -> Result<Json<CheckinSessionResponse>, ApiError> {
    require_staff(&session)?;

    let (checkin_session, payload) = CheckinService::new(state.db.clone())
        .open_session(training_id, session.user_id, state.checkin_ttl)
        .await?;

    Ok(Json(CheckinSessionResponse {
        token: checkin_session.id,
        expires_at: checkin_session.expires_at,
        payload,
    }))
}
