// CRUD round trips through the services against in-memory SQLite.

mod common;

use chrono::{Duration, NaiveDate, Utc};
use pretty_assertions::assert_eq;
use football_academy::auth::UserRole;
use football_academy::models::{
    AgeGroup, AttendanceEntry, AttendanceMethod, AttendanceStatus, Competition, CreateExternalTeam,
    CreateInjury, CreateMatch, InjurySeverity, InjuryStatus, MatchResult, PlayerStatus,
    TrainingStatus, UpdateDevelopmentPlan, UpdateInjury, UpdatePlayer, UpdateTeam, UpdateTraining,
};
use football_academy::models::{CreateDevelopmentPlan, PlanStatus};
use football_academy::services::{
    AttendanceService, DevelopmentPlanService, ExternalTeamService, InjuryService, MatchService,
    PlayerService, StatsService, TeamService, TrainingService,
};

#[tokio::test]
async fn team_crud_round_trip() {
    let pool = common::test_pool().await;
    let coach = common::insert_user(&pool, UserRole::Coach, "edzo@akademia.hu").await;
    let service = TeamService::new(pool.clone());

    let team = common::create_team(&pool, AgeGroup::U12, Some(coach)).await;
    assert_eq!(team.age_group, AgeGroup::U12);

    let fetched = service.get_team_by_id(team.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, team.name);

    let updated = service
        .update_team(
            team.id,
            UpdateTeam {
                name: Some("Akadémia U12 Sárga".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Akadémia U12 Sárga");
    // COALESCE keeps the untouched columns.
    assert_eq!(updated.coach_id, Some(coach));

    let by_season = service
        .list_teams(Some("2026/27".to_string()), None, None, None)
        .await
        .unwrap();
    assert_eq!(by_season.len(), 1);

    let wrong_group = service
        .list_teams(None, Some(AgeGroup::U8), None, None)
        .await
        .unwrap();
    assert!(wrong_group.is_empty());

    assert!(service.delete_team(team.id).await.unwrap());
    assert!(service.get_team_by_id(team.id).await.unwrap().is_none());
}

#[tokio::test]
async fn player_filters_and_soft_delete() {
    let pool = common::test_pool().await;
    let coach = common::insert_user(&pool, UserRole::Coach, "edzo@akademia.hu").await;
    let team = common::create_team(&pool, AgeGroup::U12, Some(coach)).await;
    let service = PlayerService::new(pool.clone());

    let kovacs = common::create_player(&pool, Some(team.id), "Kovács").await;
    let toth = common::create_player(&pool, Some(team.id), "Tóth").await;
    common::create_player(&pool, None, "Szabó").await;

    let in_team = service
        .list_players(Some(team.id), None, None, None, None)
        .await
        .unwrap();
    assert_eq!(in_team.len(), 2);

    let by_name = service
        .list_players(None, None, Some("Tóth".to_string()), None, None)
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, toth.id);

    // Soft delete keeps the row but drops it from active listings.
    assert!(service.deactivate_player(kovacs.id).await.unwrap());
    let still_there = service.get_player_by_id(kovacs.id).await.unwrap().unwrap();
    assert_eq!(still_there.status, PlayerStatus::Inactive);

    let active = service
        .list_players(Some(team.id), Some(PlayerStatus::Active), None, None, None)
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, toth.id);

    let updated = service
        .update_player(
            toth.id,
            UpdatePlayer {
                height_cm: Some(160),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.height_cm, Some(160));
    assert_eq!(updated.last_name, "Tóth");
}

#[tokio::test]
async fn match_results_and_team_record() {
    let pool = common::test_pool().await;
    let coach = common::insert_user(&pool, UserRole::Coach, "edzo@akademia.hu").await;
    let team = common::create_team(&pool, AgeGroup::U14, Some(coach)).await;

    let opponent = ExternalTeamService::new(pool.clone())
        .create_external_team(CreateExternalTeam {
            name: "Szeged SE".to_string(),
            city: "Szeged".to_string(),
            age_group: AgeGroup::U14,
        })
        .await
        .unwrap();

    let match_service = MatchService::new(pool.clone());
    let mut ids = Vec::new();
    for i in 0..3 {
        let fixture = match_service
            .create_match(CreateMatch {
                team_id: team.id,
                opponent_id: opponent.id,
                kickoff_at: Utc::now() - Duration::days(30 - i),
                home: i % 2 == 0,
                competition: Competition::League,
                season: "2026/27".to_string(),
            })
            .await
            .unwrap();
        assert!(!fixture.is_played());
        ids.push(fixture.id);
    }

    let unplayed = match_service
        .list_matches(Some(team.id), None, Some(false), None, None)
        .await
        .unwrap();
    assert_eq!(unplayed.len(), 3);

    for (id, (gf, ga)) in ids.iter().zip([(3, 1), (2, 2), (0, 1)]) {
        let played = match_service
            .record_result(
                *id,
                MatchResult {
                    goals_for: gf,
                    goals_against: ga,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(played.is_played());
    }

    let record = StatsService::new(pool.clone())
        .match_record(team.id, Some("2026/27".to_string()))
        .await
        .unwrap();
    assert_eq!(record.played, 3);
    assert_eq!(record.wins, 1);
    assert_eq!(record.draws, 1);
    assert_eq!(record.losses, 1);
    assert_eq!(record.goals_for, 5);
    assert_eq!(record.goals_against, 4);
}

#[tokio::test]
async fn attendance_sheet_upserts_and_summary() {
    let pool = common::test_pool().await;
    let coach = common::insert_user(&pool, UserRole::Coach, "edzo@akademia.hu").await;
    let team = common::create_team(&pool, AgeGroup::U12, Some(coach)).await;
    let anna = common::create_player(&pool, Some(team.id), "Kiss").await;
    let tomi = common::create_player(&pool, Some(team.id), "Nagy").await;
    let training = common::create_training(&pool, team.id).await;

    TrainingService::new(pool.clone())
        .update_training(
            training.id,
            UpdateTraining {
                status: Some(TrainingStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let service = AttendanceService::new(pool.clone());
    let sheet = service
        .record_sheet(
            training.id,
            vec![
                AttendanceEntry {
                    player_id: anna.id,
                    status: AttendanceStatus::Absent,
                },
                AttendanceEntry {
                    player_id: tomi.id,
                    status: AttendanceStatus::Present,
                },
            ],
        )
        .await
        .unwrap();
    assert_eq!(sheet.len(), 2);

    // Re-recording overwrites instead of duplicating.
    service
        .record(
            training.id,
            anna.id,
            AttendanceStatus::Late,
            AttendanceMethod::Manual,
        )
        .await
        .unwrap();

    let sheet = service.sheet_for_training(training.id).await.unwrap();
    assert_eq!(sheet.len(), 2);
    let anna_row = sheet.iter().find(|r| r.player_id == anna.id).unwrap();
    assert_eq!(anna_row.status, AttendanceStatus::Late);

    let history = service.player_history(anna.id, None, None).await.unwrap();
    assert_eq!(history.len(), 1);

    let summary = StatsService::new(pool.clone())
        .attendance_summary(
            team.id,
            Utc::now() - Duration::days(1),
            Utc::now() + Duration::days(1),
        )
        .await
        .unwrap();
    assert_eq!(summary.trainings, 1);
    assert_eq!(summary.records, 2);
    assert_eq!(summary.present, 1);
    assert_eq!(summary.late, 1);
    assert!((summary.attendance_rate - 1.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn injuries_drive_player_status() {
    let pool = common::test_pool().await;
    let coach = common::insert_user(&pool, UserRole::Coach, "edzo@akademia.hu").await;
    let team = common::create_team(&pool, AgeGroup::U16, Some(coach)).await;
    let player = common::create_player(&pool, Some(team.id), "Horváth").await;

    let player_service = PlayerService::new(pool.clone());
    let injury_service = InjuryService::new(pool.clone());

    let injury = injury_service
        .create_injury(CreateInjury {
            player_id: player.id,
            description: "Bokaszalag-húzódás".to_string(),
            body_part: "boka".to_string(),
            severity: InjurySeverity::Minor,
            injured_on: NaiveDate::from_ymd_opt(2026, 7, 20).unwrap(),
            expected_return: NaiveDate::from_ymd_opt(2026, 8, 10),
        })
        .await
        .unwrap();
    assert_eq!(injury.status, InjuryStatus::Recovering);

    let sidelined = player_service
        .get_player_by_id(player.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(sidelined.status, PlayerStatus::Injured);

    let current = StatsService::new(pool.clone()).current_injuries().await.unwrap();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].player_id, player.id);

    injury_service
        .update_injury(
            injury.id,
            UpdateInjury {
                status: Some(InjuryStatus::Recovered),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    let recovered = player_service
        .get_player_by_id(player.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(recovered.status, PlayerStatus::Active);
    assert!(StatsService::new(pool.clone())
        .current_injuries()
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn development_plan_progress_completes_plans() {
    let pool = common::test_pool().await;
    let coach = common::insert_user(&pool, UserRole::Coach, "edzo@akademia.hu").await;
    let team = common::create_team(&pool, AgeGroup::U13, Some(coach)).await;
    let player = common::create_player(&pool, Some(team.id), "Lakatos").await;

    let service = DevelopmentPlanService::new(pool.clone());
    let plan = service
        .create_plan(CreateDevelopmentPlan {
            player_id: player.id,
            coach_id: Some(coach),
            goal: "Gyengébb láb fejlesztése".to_string(),
            focus_area: "technika".to_string(),
            target_date: NaiveDate::from_ymd_opt(2027, 5, 31),
            notes: None,
        })
        .await
        .unwrap();
    assert_eq!(plan.progress_pct, 0);
    assert_eq!(plan.status, PlanStatus::Active);

    let halfway = service
        .update_plan(
            plan.id,
            UpdateDevelopmentPlan {
                progress_pct: Some(55),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(halfway.progress_pct, 55);
    assert_eq!(halfway.status, PlanStatus::Active);

    let done = service
        .update_plan(
            plan.id,
            UpdateDevelopmentPlan {
                progress_pct: Some(100),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(done.status, PlanStatus::Completed);
}
