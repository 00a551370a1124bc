use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{CreateInjury, Injury, InjuryStatus, PlayerStatus, UpdateInjury};

const INJURY_COLUMNS: &str = "id, player_id, description, body_part, severity, injured_on,
                              expected_return, status, created_at, updated_at";

#[derive(Clone)]
pub struct InjuryService {
    db: SqlitePool,
}

impl InjuryService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Record an injury and flip the player to injured status.
    pub async fn create_injury(&self, data: CreateInjury) -> Result<Injury> {
        let now = Utc::now();

        let injury = sqlx::query_as::<_, Injury>(&format!(
            "INSERT INTO injuries (id, player_id, description, body_part, severity, injured_on,
                                   expected_return, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, 'recovering', ?, ?)
             RETURNING {INJURY_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(data.player_id)
        .bind(&data.description)
        .bind(&data.body_part)
        .bind(data.severity)
        .bind(data.injured_on)
        .bind(data.expected_return)
        .bind(now)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        sqlx::query("UPDATE players SET status = ?, updated_at = ? WHERE id = ?")
            .bind(PlayerStatus::Injured)
            .bind(now)
            .bind(data.player_id)
            .execute(&self.db)
            .await?;

        Ok(injury)
    }

    pub async fn get_injury_by_id(&self, injury_id: Uuid) -> Result<Option<Injury>> {
        let injury = sqlx::query_as::<_, Injury>(&format!(
            "SELECT {INJURY_COLUMNS} FROM injuries WHERE id = ?"
        ))
        .bind(injury_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(injury)
    }

    pub async fn list_injuries(
        &self,
        player_id: Option<Uuid>,
        status: Option<InjuryStatus>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Injury>> {
        let limit = limit.unwrap_or(50).clamp(1, 100);
        let offset = offset.unwrap_or(0).max(0);

        let mut query = format!("SELECT {INJURY_COLUMNS} FROM injuries WHERE 1 = 1");
        if player_id.is_some() {
            query.push_str(" AND player_id = ?");
        }
        if status.is_some() {
            query.push_str(" AND status = ?");
        }
        query.push_str(" ORDER BY injured_on DESC LIMIT ? OFFSET ?");

        let mut query_builder = sqlx::query_as::<_, Injury>(&query);
        if let Some(player_id) = player_id {
            query_builder = query_builder.bind(player_id);
        }
        if let Some(status) = status {
            query_builder = query_builder.bind(status);
        }

        let injuries = query_builder
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.db)
            .await?;

        Ok(injuries)
    }

    /// Update an injury; closing it as recovered reactivates the player
    /// when no other open injury remains.
    pub async fn update_injury(
        &self,
        injury_id: Uuid,
        data: UpdateInjury,
    ) -> Result<Option<Injury>> {
        let now = Utc::now();

        let injury = sqlx::query_as::<_, Injury>(&format!(
            "UPDATE injuries
             SET description = COALESCE(?, description),
                 expected_return = COALESCE(?, expected_return),
                 status = COALESCE(?, status),
                 updated_at = ?
             WHERE id = ?
             RETURNING {INJURY_COLUMNS}"
        ))
        .bind(data.description)
        .bind(data.expected_return)
        .bind(data.status)
        .bind(now)
        .bind(injury_id)
        .fetch_optional(&self.db)
        .await?;

        if let Some(ref injury) = injury {
            if injury.status == InjuryStatus::Recovered {
                let open: Option<(i64,)> = sqlx::query_as(
                    "SELECT 1 FROM injuries WHERE player_id = ? AND status = 'recovering' LIMIT 1",
                )
                .bind(injury.player_id)
                .fetch_optional(&self.db)
                .await?;

                if open.is_none() {
                    sqlx::query("UPDATE players SET status = ?, updated_at = ? WHERE id = ? AND status = ?")
                        .bind(PlayerStatus::Active)
                        .bind(now)
                        .bind(injury.player_id)
                        .bind(PlayerStatus::Injured)
                        .execute(&self.db)
                        .await?;
                }
            }
        }

        Ok(injury)
    }

    pub async fn delete_injury(&self, injury_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM injuries WHERE id = ?")
            .bind(injury_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
