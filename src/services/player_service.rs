use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{CreatePlayer, DominantFoot, Player, PlayerStatus, UpdatePlayer};

#[derive(Clone)]
pub struct PlayerService {
    db: SqlitePool,
}

impl PlayerService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create_player(&self, data: CreatePlayer) -> Result<Player> {
        let now = Utc::now();

        let player = sqlx::query_as::<_, Player>(
            "INSERT INTO players (id, first_name, last_name, birth_date, position, dominant_foot,
                                  height_cm, weight_kg, team_id, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 'active', ?, ?)
             RETURNING id, first_name, last_name, birth_date, position, dominant_foot,
                       height_cm, weight_kg, team_id, status, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(data.first_name.trim())
        .bind(data.last_name.trim())
        .bind(data.birth_date)
        .bind(data.position)
        .bind(data.dominant_foot.unwrap_or(DominantFoot::Right))
        .bind(data.height_cm)
        .bind(data.weight_kg)
        .bind(data.team_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok(player)
    }

    pub async fn get_player_by_id(&self, player_id: Uuid) -> Result<Option<Player>> {
        let player = sqlx::query_as::<_, Player>(
            "SELECT id, first_name, last_name, birth_date, position, dominant_foot,
                    height_cm, weight_kg, team_id, status, created_at, updated_at
             FROM players WHERE id = ?",
        )
        .bind(player_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(player)
    }

    pub async fn list_players(
        &self,
        team_id: Option<Uuid>,
        status: Option<PlayerStatus>,
        name: Option<String>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Player>> {
        let limit = limit.unwrap_or(50).clamp(1, 100);
        let offset = offset.unwrap_or(0).max(0);

        let mut query = String::from(
            "SELECT id, first_name, last_name, birth_date, position, dominant_foot,
                    height_cm, weight_kg, team_id, status, created_at, updated_at
             FROM players WHERE 1 = 1",
        );
        if team_id.is_some() {
            query.push_str(" AND team_id = ?");
        }
        if status.is_some() {
            query.push_str(" AND status = ?");
        }
        if name.is_some() {
            query.push_str(" AND (first_name LIKE ? OR last_name LIKE ?)");
        }
        query.push_str(" ORDER BY last_name, first_name LIMIT ? OFFSET ?");

        let mut query_builder = sqlx::query_as::<_, Player>(&query);
        if let Some(team_id) = team_id {
            query_builder = query_builder.bind(team_id);
        }
        if let Some(status) = status {
            query_builder = query_builder.bind(status);
        }
        if let Some(name) = name {
            let pattern = format!("%{}%", name.trim());
            query_builder = query_builder.bind(pattern.clone()).bind(pattern);
        }

        let players = query_builder
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.db)
            .await?;

        Ok(players)
    }

    pub async fn update_player(
        &self,
        player_id: Uuid,
        data: UpdatePlayer,
    ) -> Result<Option<Player>> {
        let player = sqlx::query_as::<_, Player>(
            "UPDATE players
             SET first_name = COALESCE(?, first_name),
                 last_name = COALESCE(?, last_name),
                 position = COALESCE(?, position),
                 dominant_foot = COALESCE(?, dominant_foot),
                 height_cm = COALESCE(?, height_cm),
                 weight_kg = COALESCE(?, weight_kg),
                 team_id = COALESCE(?, team_id),
                 status = COALESCE(?, status),
                 updated_at = ?
             WHERE id = ?
             RETURNING id, first_name, last_name, birth_date, position, dominant_foot,
                       height_cm, weight_kg, team_id, status, created_at, updated_at",
        )
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(data.position)
        .bind(data.dominant_foot)
        .bind(data.height_cm)
        .bind(data.weight_kg)
        .bind(data.team_id)
        .bind(data.status)
        .bind(Utc::now())
        .bind(player_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(player)
    }

    pub async fn set_status(&self, player_id: Uuid, status: PlayerStatus) -> Result<bool> {
        let result = sqlx::query("UPDATE players SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(Utc::now())
            .bind(player_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Soft delete: the roster keeps the row, the player drops off active lists.
    pub async fn deactivate_player(&self, player_id: Uuid) -> Result<bool> {
        self.set_status(player_id, PlayerStatus::Inactive).await
    }
}
