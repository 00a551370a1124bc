use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{AgeGroup, CreateTeam, Player, Team, UpdateTeam};

#[derive(Clone)]
pub struct TeamService {
    db: SqlitePool,
}

impl TeamService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create_team(&self, data: CreateTeam) -> Result<Team> {
        let now = Utc::now();

        let team = sqlx::query_as::<_, Team>(
            "INSERT INTO teams (id, name, age_group, season, coach_id, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, 'active', ?, ?)
             RETURNING id, name, age_group, season, coach_id, status, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(data.age_group)
        .bind(&data.season)
        .bind(data.coach_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok(team)
    }

    pub async fn get_team_by_id(&self, team_id: Uuid) -> Result<Option<Team>> {
        let team = sqlx::query_as::<_, Team>(
            "SELECT id, name, age_group, season, coach_id, status, created_at, updated_at
             FROM teams WHERE id = ?",
        )
        .bind(team_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(team)
    }

    pub async fn list_teams(
        &self,
        season: Option<String>,
        age_group: Option<AgeGroup>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Team>> {
        let limit = limit.unwrap_or(50).clamp(1, 100);
        let offset = offset.unwrap_or(0).max(0);

        let mut query = String::from(
            "SELECT id, name, age_group, season, coach_id, status, created_at, updated_at
             FROM teams WHERE 1 = 1",
        );
        if season.is_some() {
            query.push_str(" AND season = ?");
        }
        if age_group.is_some() {
            query.push_str(" AND age_group = ?");
        }
        query.push_str(" ORDER BY season DESC, age_group LIMIT ? OFFSET ?");

        let mut query_builder = sqlx::query_as::<_, Team>(&query);
        if let Some(season) = season {
            query_builder = query_builder.bind(season);
        }
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

    pub async fn teams_coached_by(&self, coach_id: Uuid) -> Result<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>(
            "SELECT id, name, age_group, season, coach_id, status, created_at, updated_at
             FROM teams WHERE coach_id = ? ORDER BY season DESC, age_group",
        )
        .bind(coach_id)
        .fetch_all(&self.db)
        .await?;

        Ok(teams)
    }

    pub async fn update_team(&self, team_id: Uuid, data: UpdateTeam) -> Result<Option<Team>> {
        let team = sqlx::query_as::<_, Team>(
            "UPDATE teams
             SET name = COALESCE(?, name),
                 coach_id = COALESCE(?, coach_id),
                 status = COALESCE(?, status),
                 updated_at = ?
             WHERE id = ?
             RETURNING id, name, age_group, season, coach_id, status, created_at, updated_at",
        )
        .bind(data.name)
        .bind(data.coach_id)
        .bind(data.status)
        .bind(Utc::now())
        .bind(team_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(team)
    }

    pub async fn delete_team(&self, team_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM teams WHERE id = ?")
            .bind(team_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn get_team_players(&self, team_id: Uuid) -> Result<Vec<Player>> {
        let players = sqlx::query_as::<_, Player>(
            "SELECT id, first_name, last_name, birth_date, position, dominant_foot,
                    height_cm, weight_kg, team_id, status, created_at, updated_at
             FROM players WHERE team_id = ? ORDER BY last_name, first_name",
        )
        .bind(team_id)
        .fetch_all(&self.db)
        .await?;

        Ok(players)
    }
}
