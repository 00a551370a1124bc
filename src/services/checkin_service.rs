use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{
    Attendance, AttendanceMethod, AttendanceStatus, CheckinPayload, CheckinResponse,
    CheckinSession, Player, Training,
};
use crate::services::AttendanceService;

const SESSION_COLUMNS: &str = "id, training_id, issued_by, issued_at, expires_at, revoked";

/// QR attendance: a coach opens a short-lived check-in window for a
/// training, players scan the code, the server validates and records.
#[derive(Clone)]
pub struct CheckinService {
    db: SqlitePool,
}

impl CheckinService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Open a check-in window. Any previous window for the same training
    /// is revoked, so a stale QR image on a projector stops working the
    /// moment the coach refreshes it.
    pub async fn open_session(
        &self,
        training_id: Uuid,
        issued_by: Uuid,
        ttl: Duration,
    ) -> Result<(CheckinSession, CheckinPayload), ApiError> {
        let training = self.get_training(training_id).await?;

        sqlx::query("UPDATE checkin_sessions SET revoked = 1 WHERE training_id = ? AND revoked = 0")
            .bind(training.id)
            .execute(&self.db)
            .await?;

        let now = Utc::now();
        let session = sqlx::query_as::<_, CheckinSession>(&format!(
            "INSERT INTO checkin_sessions (id, training_id, issued_by, issued_at, expires_at, revoked)
             VALUES (?, ?, ?, ?, ?, 0)
             RETURNING {SESSION_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(training.id)
        .bind(issued_by)
        .bind(now)
        .bind(now + ttl)
        .fetch_one(&self.db)
        .await?;

        let payload = CheckinPayload {
            token: session.id,
            training_id: session.training_id,
            expires_at: session.expires_at,
        };

        Ok((session, payload))
    }

    pub async fn get_session(&self, token: Uuid) -> Result<Option<CheckinSession>, ApiError> {
        let session = sqlx::query_as::<_, CheckinSession>(&format!(
            "SELECT {SESSION_COLUMNS} FROM checkin_sessions WHERE id = ?"
        ))
        .bind(token)
        .fetch_optional(&self.db)
        .await?;

        Ok(session)
    }

    pub async fn revoke_session(&self, token: Uuid) -> Result<bool, ApiError> {
        let result = sqlx::query("UPDATE checkin_sessions SET revoked = 1 WHERE id = ?")
            .bind(token)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Validate a scanned code and record attendance. A second scan of the
    /// same player is not an error, the kiosk just learns nothing changed.
    pub async fn check_in(
        &self,
        token: Uuid,
        player_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<CheckinResponse, ApiError> {
        let session = self.get_session(token).await?.ok_or(ApiError::NotFound)?;

        if session.revoked {
            return Err(ApiError::CheckinRevoked);
        }
        if session.is_expired(now) {
            return Err(ApiError::CheckinExpired);
        }

        let training = self.get_training(session.training_id).await?;

        let player = sqlx::query_as::<_, Player>(
            "SELECT id, first_name, last_name, birth_date, position, dominant_foot,
                    height_cm, weight_kg, team_id, status, created_at, updated_at
             FROM players WHERE id = ?",
        )
        .bind(player_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ApiError::NotFound)?;

        if player.team_id != Some(training.team_id) {
            return Err(ApiError::Validation(
                "Player is not on the training's team".to_string(),
            ));
        }

        let attendance_service = AttendanceService::new(self.db.clone());

        if let Some(existing) = attendance_service
            .get_record(training.id, player.id)
            .await
            .map_err(ApiError::Internal)?
        {
            return Ok(checkin_response(existing, true));
        }

        let record = attendance_service
            .record(
                training.id,
                player.id,
                AttendanceStatus::Present,
                AttendanceMethod::Qr,
            )
            .await
            .map_err(ApiError::Internal)?;

        Ok(checkin_response(record, false))
    }

    async fn get_training(&self, training_id: Uuid) -> Result<Training, ApiError> {
        let training = sqlx::query_as::<_, Training>(
            "SELECT id, team_id, starts_at, ends_at, location, focus, status, created_at, updated_at
             FROM trainings WHERE id = ?",
        )
        .bind(training_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ApiError::NotFound)?;

        Ok(training)
    }
}

fn checkin_response(record: Attendance, already_checked_in: bool) -> CheckinResponse {
    CheckinResponse {
        training_id: record.training_id,
        player_id: record.player_id,
        status: record.status,
        already_checked_in,
    }
}
