use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{CreateTraining, Training, UpdateTraining};

const TRAINING_COLUMNS: &str =
    "id, team_id, starts_at, ends_at, location, focus, status, created_at, updated_at";

#[derive(Clone)]
pub struct TrainingService {
    db: SqlitePool,
}

impl TrainingService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create_training(&self, data: CreateTraining) -> Result<Training> {
        let now = Utc::now();

        let training = sqlx::query_as::<_, Training>(&format!(
            "INSERT INTO trainings (id, team_id, starts_at, ends_at, location, focus, status,
                                    created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, 'scheduled', ?, ?)
             RETURNING {TRAINING_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(data.team_id)
        .bind(data.starts_at)
        .bind(data.ends_at)
        .bind(&data.location)
        .bind(data.focus)
        .bind(now)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok(training)
    }

    pub async fn get_training_by_id(&self, training_id: Uuid) -> Result<Option<Training>> {
        let training = sqlx::query_as::<_, Training>(&format!(
            "SELECT {TRAINING_COLUMNS} FROM trainings WHERE id = ?"
        ))
        .bind(training_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(training)
    }

    pub async fn list_trainings(
        &self,
        team_id: Option<Uuid>,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Training>> {
        let limit = limit.unwrap_or(50).clamp(1, 100);
        let offset = offset.unwrap_or(0).max(0);

        let mut query = format!("SELECT {TRAINING_COLUMNS} FROM trainings WHERE 1 = 1");
        if team_id.is_some() {
            query.push_str(" AND team_id = ?");
        }
        if from.is_some() {
            query.push_str(" AND starts_at >= ?");
        }
        if to.is_some() {
            query.push_str(" AND starts_at < ?");
        }
        query.push_str(" ORDER BY starts_at LIMIT ? OFFSET ?");

        let mut query_builder = sqlx::query_as::<_, Training>(&query);
        if let Some(team_id) = team_id {
            query_builder = query_builder.bind(team_id);
        }
        if let Some(from) = from {
            query_builder = query_builder.bind(from);
        }
        if let Some(to) = to {
            query_builder = query_builder.bind(to);
        }

        let trainings = query_builder
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.db)
            .await?;

        Ok(trainings)
    }

    pub async fn update_training(
        &self,
        training_id: Uuid,
        data: UpdateTraining,
    ) -> Result<Option<Training>> {
        let training = sqlx::query_as::<_, Training>(&format!(
            "UPDATE trainings
             SET starts_at = COALESCE(?, starts_at),
                 ends_at = COALESCE(?, ends_at),
                 location = COALESCE(?, location),
                 focus = COALESCE(?, focus),
                 status = COALESCE(?, status),
                 updated_at = ?
             WHERE id = ?
             RETURNING {TRAINING_COLUMNS}"
        ))
        .bind(data.starts_at)
        .bind(data.ends_at)
        .bind(data.location)
        .bind(data.focus)
        .bind(data.status)
        .bind(Utc::now())
        .bind(training_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(training)
    }

    pub async fn delete_training(&self, training_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM trainings WHERE id = ?")
            .bind(training_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
