use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{Attendance, AttendanceEntry, AttendanceMethod, AttendanceStatus};

const ATTENDANCE_COLUMNS: &str =
    "id, training_id, player_id, status, method, checked_in_at, created_at";

#[derive(Clone)]
pub struct AttendanceService {
    db: SqlitePool,
}

impl AttendanceService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Full sheet for one training.
    pub async fn sheet_for_training(&self, training_id: Uuid) -> Result<Vec<Attendance>> {
        let records = sqlx::query_as::<_, Attendance>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE training_id = ? ORDER BY created_at"
        ))
        .bind(training_id)
        .fetch_all(&self.db)
        .await?;

        Ok(records)
    }

    pub async fn get_record(
        &self,
        training_id: Uuid,
        player_id: Uuid,
    ) -> Result<Option<Attendance>> {
        let record = sqlx::query_as::<_, Attendance>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE training_id = ? AND player_id = ?"
        ))
        .bind(training_id)
        .bind(player_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(record)
    }

    /// Upsert one record; a re-recorded line overwrites the previous status.
    pub async fn record(
        &self,
        training_id: Uuid,
        player_id: Uuid,
        status: AttendanceStatus,
        method: AttendanceMethod,
    ) -> Result<Attendance> {
        let now = Utc::now();
        let checked_in_at = match status {
            AttendanceStatus::Present | AttendanceStatus::Late => Some(now),
            AttendanceStatus::Absent | AttendanceStatus::Excused => None,
        };

        let record = sqlx::query_as::<_, Attendance>(&format!(
            "INSERT INTO attendance (id, training_id, player_id, status, method, checked_in_at, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT (training_id, player_id)
             DO UPDATE SET status = excluded.status,
                           method = excluded.method,
                           checked_in_at = excluded.checked_in_at
             RETURNING {ATTENDANCE_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(training_id)
        .bind(player_id)
        .bind(status)
        .bind(method)
        .bind(checked_in_at)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok(record)
    }

    /// A coach submits the whole sheet in one call.
    pub async fn record_sheet(
        &self,
        training_id: Uuid,
        entries: Vec<AttendanceEntry>,
    ) -> Result<Vec<Attendance>> {
        let mut records = Vec::with_capacity(entries.len());
        for entry in entries {
            let record = self
                .record(
                    training_id,
                    entry.player_id,
                    entry.status,
                    AttendanceMethod::Manual,
                )
                .await?;
            records.push(record);
        }

        Ok(records)
    }

    pub async fn player_history(
        &self,
        player_id: Uuid,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Attendance>> {
        let limit = limit.unwrap_or(50).clamp(1, 100);
        let offset = offset.unwrap_or(0).max(0);

        let records = sqlx::query_as::<_, Attendance>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE player_id = ?
             ORDER BY created_at DESC LIMIT ? OFFSET ?"
        ))
        .bind(player_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        Ok(records)
    }
}
