// Shared helpers for the integration suites: an in-memory SQLite pool
// with the real migrations applied, plus fixture builders.
#![allow(dead_code)]

use chrono::{Duration, NaiveDate, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use uuid::Uuid;

use football_academy::auth::UserRole;
use football_academy::config::MIGRATOR;
use football_academy::models::{
    AgeGroup, CreatePlayer, CreateTeam, CreateTraining, DominantFoot, Player, Position, Team,
    Training,
};
use football_academy::services::{PlayerService, TeamService, TrainingService};

/// One connection only: each pooled connection would otherwise get its
/// own private in-memory database.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid sqlite url")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("in-memory pool");

    MIGRATOR.run(&pool).await.expect("migrations apply");

    pool
}

pub async fn insert_user(pool: &SqlitePool, role: UserRole, email: &str) -> Uuid {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        "INSERT INTO users (id, email, password_hash, full_name, role, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(email)
    .bind("$2b$12$invalidhashforauthtests0000000000000000000000000000000")
    .bind("Teszt Felhasználó")
    .bind(role)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .expect("insert user");

    id
}

pub async fn create_team(pool: &SqlitePool, age_group: AgeGroup, coach_id: Option<Uuid>) -> Team {
    TeamService::new(pool.clone())
        .create_team(CreateTeam {
            name: format!("Akadémia {}", age_group.as_str()),
            age_group,
            season: "2026/27".to_string(),
            coach_id,
        })
        .await
        .expect("create team")
}

pub async fn create_player(pool: &SqlitePool, team_id: Option<Uuid>, last_name: &str) -> Player {
    PlayerService::new(pool.clone())
        .create_player(CreatePlayer {
            first_name: "Bence".to_string(),
            last_name: last_name.to_string(),
            birth_date: NaiveDate::from_ymd_opt(2014, 5, 12).expect("valid date"),
            position: Position::Midfielder,
            dominant_foot: Some(DominantFoot::Right),
            height_cm: Some(152),
            weight_kg: Some(41.5),
            team_id,
        })
        .await
        .expect("create player")
}

pub async fn create_training(pool: &SqlitePool, team_id: Uuid) -> Training {
    let starts_at = Utc::now() + Duration::hours(1);

    TrainingService::new(pool.clone())
        .create_training(CreateTraining {
            team_id,
            starts_at,
            ends_at: starts_at + Duration::minutes(90),
            location: "Fő pálya".to_string(),
            focus: Some("labdabirtoklás".to_string()),
        })
        .await
        .expect("create training")
}
