// QR attendance flow: open a window, scan, and every way a scan can fail.

mod common;

use chrono::{Duration, Utc};
use football_academy::auth::UserRole;
use football_academy::error::ApiError;
use football_academy::models::{AgeGroup, AttendanceMethod, AttendanceStatus};
use football_academy::services::{AttendanceService, CheckinService};
use uuid::Uuid;

#[tokio::test]
async fn check_in_records_attendance_and_tolerates_double_scans() {
    let pool = common::test_pool().await;
    let coach = common::insert_user(&pool, UserRole::Coach, "edzo@akademia.hu").await;
    let team = common::create_team(&pool, AgeGroup::U12, Some(coach)).await;
    let player = common::create_player(&pool, Some(team.id), "Kovács").await;
    let training = common::create_training(&pool, team.id).await;

    let service = CheckinService::new(pool.clone());

    let (session, payload) = service
        .open_session(training.id, coach, Duration::minutes(15))
        .await
        .expect("open session");
    assert_eq!(payload.token, session.id);
    assert_eq!(payload.training_id, training.id);
    assert!(payload.expires_at > Utc::now());

    let first = service
        .check_in(session.id, player.id, Utc::now())
        .await
        .expect("first scan");
    assert_eq!(first.status, AttendanceStatus::Present);
    assert!(!first.already_checked_in);

    // The row carries the QR method.
    let record = AttendanceService::new(pool.clone())
        .get_record(training.id, player.id)
        .await
        .expect("query record")
        .expect("record exists");
    assert_eq!(record.method, AttendanceMethod::Qr);
    assert!(record.checked_in_at.is_some());

    // Scanning again is reported, not rejected.
    let second = service
        .check_in(session.id, player.id, Utc::now())
        .await
        .expect("second scan");
    assert!(second.already_checked_in);
    assert_eq!(second.status, AttendanceStatus::Present);
}

#[tokio::test]
async fn expired_codes_never_record_attendance() {
    let pool = common::test_pool().await;
    let coach = common::insert_user(&pool, UserRole::Coach, "edzo@akademia.hu").await;
    let team = common::create_team(&pool, AgeGroup::U14, Some(coach)).await;
    let player = common::create_player(&pool, Some(team.id), "Tóth").await;
    let training = common::create_training(&pool, team.id).await;

    let service = CheckinService::new(pool.clone());
    let (session, _) = service
        .open_session(training.id, coach, Duration::minutes(15))
        .await
        .expect("open session");

    let after_expiry = session.expires_at + Duration::seconds(1);
    let err = service
        .check_in(session.id, player.id, after_expiry)
        .await
        .expect_err("expired scan rejected");
    assert!(matches!(err, ApiError::CheckinExpired));

    // Nothing was written.
    let record = AttendanceService::new(pool.clone())
        .get_record(training.id, player.id)
        .await
        .expect("query record");
    assert!(record.is_none());
}

#[tokio::test]
async fn revoked_and_unknown_tokens_are_rejected() {
    let pool = common::test_pool().await;
    let coach = common::insert_user(&pool, UserRole::Coach, "edzo@akademia.hu").await;
    let team = common::create_team(&pool, AgeGroup::U10, Some(coach)).await;
    let player = common::create_player(&pool, Some(team.id), "Szabó").await;
    let training = common::create_training(&pool, team.id).await;

    let service = CheckinService::new(pool.clone());
    let (session, _) = service
        .open_session(training.id, coach, Duration::minutes(15))
        .await
        .expect("open session");

    assert!(service.revoke_session(session.id).await.expect("revoke"));

    let err = service
        .check_in(session.id, player.id, Utc::now())
        .await
        .expect_err("revoked scan rejected");
    assert!(matches!(err, ApiError::CheckinRevoked));

    let err = service
        .check_in(Uuid::new_v4(), player.id, Utc::now())
        .await
        .expect_err("unknown token rejected");
    assert!(matches!(err, ApiError::NotFound));
}

#[tokio::test]
async fn reopening_a_window_kills_the_previous_code() {
    let pool = common::test_pool().await;
    let coach = common::insert_user(&pool, UserRole::Coach, "edzo@akademia.hu").await;
    let team = common::create_team(&pool, AgeGroup::U16, Some(coach)).await;
    let player = common::create_player(&pool, Some(team.id), "Varga").await;
    let training = common::create_training(&pool, team.id).await;

    let service = CheckinService::new(pool.clone());
    let (old_session, _) = service
        .open_session(training.id, coach, Duration::minutes(15))
        .await
        .expect("first window");
    let (new_session, _) = service
        .open_session(training.id, coach, Duration::minutes(15))
        .await
        .expect("second window");

    let err = service
        .check_in(old_session.id, player.id, Utc::now())
        .await
        .expect_err("stale code rejected");
    assert!(matches!(err, ApiError::CheckinRevoked));

    service
        .check_in(new_session.id, player.id, Utc::now())
        .await
        .expect("fresh code works");
}

#[tokio::test]
async fn players_from_other_teams_cannot_check_in() {
    let pool = common::test_pool().await;
    let coach = common::insert_user(&pool, UserRole::Coach, "edzo@akademia.hu").await;
    let team = common::create_team(&pool, AgeGroup::U12, Some(coach)).await;
    let other_team = common::create_team(&pool, AgeGroup::U13, Some(coach)).await;
    let outsider = common::create_player(&pool, Some(other_team.id), "Molnár").await;
    let training = common::create_training(&pool, team.id).await;

    let service = CheckinService::new(pool.clone());
    let (session, _) = service
        .open_session(training.id, coach, Duration::minutes(15))
        .await
        .expect("open session");

    let err = service
        .check_in(session.id, outsider.id, Utc::now())
        .await
        .expect_err("wrong team rejected");
    assert!(matches!(err, ApiError::Validation(_)));
}
