use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{AgeGroup, CreateExternalTeam, ExternalTeam};

#[derive(Clone)]
pub struct ExternalTeamService {
    db: SqlitePool,
}

impl ExternalTeamService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create_external_team(&self, data: CreateExternalTeam) -> Result<ExternalTeam> {
        let team = sqlx::query_as::<_, ExternalTeam>(
            "INSERT INTO external_teams (id, name, city, age_group, created_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING id, name, city, age_group, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(&data.city)
        .bind(data.age_group)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(team)
    }

    pub async fn get_external_team_by_id(&self, team_id: Uuid) -> Result<Option<ExternalTeam>> {
        let team = sqlx::query_as::<_, ExternalTeam>(
            "SELECT id, name, city, age_group, created_at FROM external_teams WHERE id = ?",
        )
        .bind(team_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(team)
    }

    pub async fn list_external_teams(
        &self,
        age_group: Option<AgeGroup>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ExternalTeam>> {
        let limit = limit.unwrap_or(50).clamp(1, 100);
        let offset = offset.unwrap_or(0).max(0);

        let mut query =
            String::from("SELECT id, name, city, age_group, created_at FROM external_teams");
        if age_group.is_some() {
            query.push_str(" WHERE age_group = ?");
        }
        query.push_str(" ORDER BY name LIMIT ? OFFSET ?");

        let mut query_builder = sqlx::query_as::<_, ExternalTeam>(&query);
        if let Some(age_group) = age_group {
            query_builder = query_builder.bind(age_group);
        }

        let teams = query_builder
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.db)
            .await?;

        Ok(teams)
    }

    pub async fn delete_external_team(&self, team_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM external_teams WHERE id = ?")
            .bind(team_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
