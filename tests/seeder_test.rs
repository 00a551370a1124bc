// Seeder smoke test: a small academy, checked for internal consistency.

mod common;

use chrono::Utc;
use football_academy::models::AgeGroup;
use football_academy::seed::{AcademySeeder, SeedConfig};

#[tokio::test]
async fn seeder_builds_a_consistent_academy() {
    let pool = common::test_pool().await;

    let summary = AcademySeeder::new(
        pool.clone(),
        SeedConfig {
            seasons: 2,
            clear: false,
            rng_seed: Some(42),
        },
    )
    .run()
    .await
    .expect("seeding succeeds");

    // One team per age group per season.
    assert_eq!(summary.seasons.len(), 2);
    assert_eq!(summary.teams, AgeGroup::ALL.len() * 2);
    assert!(summary.players >= AgeGroup::ALL.len() * 14);
    assert!(summary.users > summary.parent_links);

    let (teams,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM teams")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(teams as usize, summary.teams);

    let (players,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM players")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(players as usize, summary.players);

    let (links,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM parent_child_relationships")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(links as usize, summary.parent_links);

    // Cohort invariant: every player's birth year matches the age group
    // of the (current-season) team they ended up on.
    let rows: Vec<(String, String, String)> = sqlx::query_as(
        "SELECT p.birth_date, t.age_group, t.season
         FROM players p JOIN teams t ON t.id = p.team_id",
    )
    .fetch_all(&pool)
    .await
    .unwrap();
    assert!(!rows.is_empty());

    for (birth_date, age_group, season) in rows {
        let birth_year: i32 = birth_date[..4].parse().expect("ISO date");
        let age: i32 = age_group[1..].parse().expect("U<age>");
        let season_start: i32 = season[..4].parse().expect("YYYY/yy");
        assert_eq!(birth_year, season_start - age, "player out of cohort");
    }

    // Scores exist exactly for fixtures already behind us.
    let now = Utc::now();
    let (future_played,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM matches WHERE goals_for IS NOT NULL AND kickoff_at > ?",
    )
    .bind(now)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(future_played, 0);

    let (played,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM matches WHERE goals_for IS NOT NULL")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(played > 0);

    // No attendance on trainings that have not happened yet.
    let (future_attendance,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM attendance a
         JOIN trainings t ON t.id = a.training_id
         WHERE t.starts_at > ?",
    )
    .bind(now)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(future_attendance, 0);

    assert!(summary.attendance_records > 0);
    let (attendance,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM attendance")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(attendance as usize, summary.attendance_records);
}

#[tokio::test]
async fn seeder_is_deterministic_for_a_fixed_seed() {
    let config = SeedConfig {
        seasons: 1,
        clear: false,
        rng_seed: Some(7),
    };

    let pool_a = common::test_pool().await;
    let summary_a = AcademySeeder::new(pool_a, config.clone())
        .run()
        .await
        .expect("first run");

    let pool_b = common::test_pool().await;
    let summary_b = AcademySeeder::new(pool_b, config)
        .run()
        .await
        .expect("second run");

    assert_eq!(summary_a.users, summary_b.users);
    assert_eq!(summary_a.players, summary_b.players);
    assert_eq!(summary_a.matches, summary_b.matches);
    assert_eq!(summary_a.injuries, summary_b.injuries);
    assert_eq!(summary_a.development_plans, summary_b.development_plans);
    assert_eq!(summary_a.parent_links, summary_b.parent_links);
}

#[tokio::test]
async fn clear_flag_wipes_previous_data() {
    let pool = common::test_pool().await;

    AcademySeeder::new(
        pool.clone(),
        SeedConfig {
            seasons: 1,
            clear: false,
            rng_seed: Some(1),
        },
    )
    .run()
    .await
    .expect("first seeding");

    // Reseeding with --clear starts from an empty academy instead of
    // tripping the (age_group, season) uniqueness.
    let summary = AcademySeeder::new(
        pool.clone(),
        SeedConfig {
            seasons: 1,
            clear: true,
            rng_seed: Some(2),
        },
    )
    .run()
    .await
    .expect("reseeding with clear");

    let (teams,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM teams")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(teams as usize, summary.teams);
}
