use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{CreateMatch, Match, MatchResult, UpdateMatch};

const MATCH_COLUMNS: &str = "id, team_id, opponent_id, kickoff_at, home, competition, season,
                             goals_for, goals_against, created_at, updated_at";

#[derive(Clone)]
pub struct MatchService {
    db: SqlitePool,
}

impl MatchService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create_match(&self, data: CreateMatch) -> Result<Match> {
        let now = Utc::now();

        let fixture = sqlx::query_as::<_, Match>(&format!(
            "INSERT INTO matches (id, team_id, opponent_id, kickoff_at, home, competition, season,
                                  created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {MATCH_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(data.team_id)
        .bind(data.opponent_id)
        .bind(data.kickoff_at)
        .bind(data.home)
        .bind(data.competition)
        .bind(&data.season)
        .bind(now)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok(fixture)
    }

    pub async fn get_match_by_id(&self, match_id: Uuid) -> Result<Option<Match>> {
        let fixture = sqlx::query_as::<_, Match>(&format!(
            "SELECT {MATCH_COLUMNS} FROM matches WHERE id = ?"
        ))
        .bind(match_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(fixture)
    }

    pub async fn list_matches(
        &self,
        team_id: Option<Uuid>,
        season: Option<String>,
        played: Option<bool>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Match>> {
        let limit = limit.unwrap_or(50).clamp(1, 100);
        let offset = offset.unwrap_or(0).max(0);

        let mut query = format!("SELECT {MATCH_COLUMNS} FROM matches WHERE 1 = 1");
        if team_id.is_some() {
            query.push_str(" AND team_id = ?");
        }
        if season.is_some() {
            query.push_str(" AND season = ?");
        }
        match played {
            Some(true) => query.push_str(" AND goals_for IS NOT NULL"),
            Some(false) => query.push_str(" AND goals_for IS NULL"),
            None => {}
        }
        query.push_str(" ORDER BY kickoff_at LIMIT ? OFFSET ?");

        let mut query_builder = sqlx::query_as::<_, Match>(&query);
        if let Some(team_id) = team_id {
            query_builder = query_builder.bind(team_id);
        }
        if let Some(season) = season {
            query_builder = query_builder.bind(season);
        }

        let matches = query_builder
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.db)
            .await?;

        Ok(matches)
    }

    pub async fn update_match(&self, match_id: Uuid, data: UpdateMatch) -> Result<Option<Match>> {
        let fixture = sqlx::query_as::<_, Match>(&format!(
            "UPDATE matches
             SET kickoff_at = COALESCE(?, kickoff_at),
                 home = COALESCE(?, home),
                 competition = COALESCE(?, competition),
                 updated_at = ?
             WHERE id = ?
             RETURNING {MATCH_COLUMNS}"
        ))
        .bind(data.kickoff_at)
        .bind(data.home)
        .bind(data.competition)
        .bind(Utc::now())
        .bind(match_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(fixture)
    }

    /// Record the final score; the fixture then reads as played.
    pub async fn record_result(
        &self,
        match_id: Uuid,
        result: MatchResult,
    ) -> Result<Option<Match>> {
        let fixture = sqlx::query_as::<_, Match>(&format!(
            "UPDATE matches SET goals_for = ?, goals_against = ?, updated_at = ?
             WHERE id = ?
             RETURNING {MATCH_COLUMNS}"
        ))
        .bind(result.goals_for)
        .bind(result.goals_against)
        .bind(Utc::now())
        .bind(match_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(fixture)
    }

    pub async fn delete_match(&self, match_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM matches WHERE id = ?")
            .bind(match_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
