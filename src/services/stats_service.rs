use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::models::{AgeGroup, AttendanceStatus, InjurySeverity};

/// Analytical queries behind the dashboard endpoints.
#[derive(Clone)]
pub struct StatsService {
    db: SqlitePool,
}

#[derive(Debug, Serialize, FromRow)]
pub struct SquadSize {
    pub team_id: Uuid,
    pub team_name: String,
    pub age_group: AgeGroup,
    pub player_count: i64,
}

#[derive(Debug, Serialize)]
pub struct AttendanceSummary {
    pub team_id: Uuid,
    pub trainings: i64,
    pub records: i64,
    pub present: i64,
    pub late: i64,
    pub absent: i64,
    pub excused: i64,
    /// Share of records where the player showed up (present or late).
    pub attendance_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct TeamMatchRecord {
    pub team_id: Uuid,
    pub played: i64,
    pub wins: i64,
    pub draws: i64,
    pub losses: i64,
    pub goals_for: i64,
    pub goals_against: i64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct InjuredPlayer {
    pub injury_id: Uuid,
    pub player_id: Uuid,
    pub player_name: String,
    pub team_id: Option<Uuid>,
    pub body_part: String,
    pub severity: InjurySeverity,
    pub injured_on: NaiveDate,
    pub expected_return: Option<NaiveDate>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct TeamPlanProgress {
    pub team_id: Uuid,
    pub team_name: String,
    pub active_plans: i64,
    pub avg_progress: Option<f64>,
}

impl StatsService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Active squad size for every team of a season.
    pub async fn squad_sizes(&self, season: &str) -> Result<Vec<SquadSize>> {
        let rows = sqlx::query_as::<_, SquadSize>(
            "SELECT t.id AS team_id, t.name AS team_name, t.age_group AS age_group,
                    COUNT(p.id) AS player_count
             FROM teams t
             LEFT JOIN players p ON p.team_id = t.id AND p.status != 'inactive'
             WHERE t.season = ?
             GROUP BY t.id
             ORDER BY t.age_group",
        )
        .bind(season)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    pub async fn attendance_summary(
        &self,
        team_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<AttendanceSummary> {
        let trainings: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM trainings
             WHERE team_id = ? AND starts_at >= ? AND starts_at < ?",
        )
        .bind(team_id)
        .bind(from)
        .bind(to)
        .fetch_one(&self.db)
        .await?;

        let counts: Vec<(AttendanceStatus, i64)> = sqlx::query_as(
            "SELECT a.status, COUNT(*)
             FROM attendance a
             JOIN trainings tr ON tr.id = a.training_id
             WHERE tr.team_id = ? AND tr.starts_at >= ? AND tr.starts_at < ?
             GROUP BY a.status",
        )
        .bind(team_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.db)
        .await?;

        let mut summary = AttendanceSummary {
            team_id,
            trainings: trainings.0,
            records: 0,
            present: 0,
            late: 0,
            absent: 0,
            excused: 0,
            attendance_rate: 0.0,
        };

        for (status, count) in counts {
            summary.records += count;
            match status {
                AttendanceStatus::Present => summary.present += count,
                AttendanceStatus::Late => summary.late += count,
                AttendanceStatus::Absent => summary.absent += count,
                AttendanceStatus::Excused => summary.excused += count,
            }
        }

        if summary.records > 0 {
            summary.attendance_rate =
                (summary.present + summary.late) as f64 / summary.records as f64;
        }

        Ok(summary)
    }

    pub async fn match_record(
        &self,
        team_id: Uuid,
        season: Option<String>,
    ) -> Result<TeamMatchRecord> {
        let mut query = String::from(
            "SELECT goals_for, goals_against FROM matches
             WHERE team_id = ? AND goals_for IS NOT NULL AND goals_against IS NOT NULL",
        );
        if season.is_some() {
            query.push_str(" AND season = ?");
        }

        let mut query_builder = sqlx::query_as::<_, (i64, i64)>(&query).bind(team_id);
        if let Some(season) = season {
            query_builder = query_builder.bind(season);
        }

        let results = query_builder.fetch_all(&self.db).await?;

        let mut record = TeamMatchRecord {
            team_id,
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
        };

        for (gf, ga) in results {
            record.played += 1;
            record.goals_for += gf;
            record.goals_against += ga;
            match gf.cmp(&ga) {
                std::cmp::Ordering::Greater => record.wins += 1,
                std::cmp::Ordering::Equal => record.draws += 1,
                std::cmp::Ordering::Less => record.losses += 1,
            }
        }

        Ok(record)
    }

    /// Every player still listed as recovering, newest injury first.
    pub async fn current_injuries(&self) -> Result<Vec<InjuredPlayer>> {
        let rows = sqlx::query_as::<_, InjuredPlayer>(
            "SELECT i.id AS injury_id, p.id AS player_id,
                    p.last_name || ' ' || p.first_name AS player_name,
                    p.team_id AS team_id, i.body_part, i.severity, i.injured_on, i.expected_return
             FROM injuries i
             JOIN players p ON p.id = i.player_id
             WHERE i.status = 'recovering'
             ORDER BY i.injured_on DESC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Active development-plan counts and mean progress per team.
    pub async fn development_progress(&self, season: Option<String>) -> Result<Vec<TeamPlanProgress>> {
        let mut query = String::from(
            "SELECT t.id AS team_id, t.name AS team_name,
                    COUNT(dp.id) AS active_plans, AVG(dp.progress_pct) AS avg_progress
             FROM teams t
             LEFT JOIN players p ON p.team_id = t.id
             LEFT JOIN development_plans dp ON dp.player_id = p.id AND dp.status = 'active'",
        );
        if season.is_some() {
            query.push_str(" WHERE t.season = ?");
        }
        query.push_str(" GROUP BY t.id ORDER BY t.age_group");

        let mut query_builder = sqlx::query_as::<_, TeamPlanProgress>(&query);
        if let Some(season) = season {
            query_builder = query_builder.bind(season);
        }

        let rows = query_builder.fetch_all(&self.db).await?;

        Ok(rows)
    }
}
