// Family access control: relationship rows plus privacy flags decide
// what a parent may read; coaches see their own squads, admins see all.

mod common;

use football_academy::auth::{UserRole, UserSession};
use football_academy::error::ApiError;
use football_academy::models::{
    AgeGroup, CreateFamilyLink, PrivacyCategory, Relationship, UpdatePrivacySettings,
};
use football_academy::services::FamilyService;
use uuid::Uuid;

fn session(user_id: Uuid, role: UserRole) -> UserSession {
    UserSession {
        user_id,
        email: "teszt@example.hu".to_string(),
        role,
        jti: Uuid::new_v4().to_string(),
    }
}

#[tokio::test]
async fn linked_parent_sees_what_the_family_shares() {
    let pool = common::test_pool().await;
    let parent = common::insert_user(&pool, UserRole::Parent, "szulo@example.hu").await;
    let coach = common::insert_user(&pool, UserRole::Coach, "edzo@akademia.hu").await;
    let team = common::create_team(&pool, AgeGroup::U12, Some(coach)).await;
    let player = common::create_player(&pool, Some(team.id), "Kiss").await;

    let service = FamilyService::new(pool.clone());

    service
        .link(CreateFamilyLink {
            parent_id: parent,
            player_id: player.id,
            relationship: Relationship::Mother,
        })
        .await
        .expect("link parent");

    assert!(service.parent_of(parent, player.id).await.unwrap());

    // Defaults share everything.
    for category in [
        PrivacyCategory::Medical,
        PrivacyCategory::Attendance,
        PrivacyCategory::Development,
    ] {
        service
            .ensure_can_view(&session(parent, UserRole::Parent), player.id, category)
            .await
            .expect("default sharing");
    }

    // The family turns medical sharing off; the rest stays visible.
    service
        .update_privacy(
            player.id,
            UpdatePrivacySettings {
                share_medical: Some(false),
                ..Default::default()
            },
        )
        .await
        .expect("update privacy");

    let err = service
        .ensure_can_view(
            &session(parent, UserRole::Parent),
            player.id,
            PrivacyCategory::Medical,
        )
        .await
        .expect_err("medical hidden");
    assert!(matches!(err, ApiError::Forbidden));

    service
        .ensure_can_view(
            &session(parent, UserRole::Parent),
            player.id,
            PrivacyCategory::Attendance,
        )
        .await
        .expect("attendance still shared");
}

#[tokio::test]
async fn unrelated_parents_are_locked_out() {
    let pool = common::test_pool().await;
    let parent = common::insert_user(&pool, UserRole::Parent, "szulo@example.hu").await;
    let stranger = common::insert_user(&pool, UserRole::Parent, "masik.szulo@example.hu").await;
    let coach = common::insert_user(&pool, UserRole::Coach, "edzo@akademia.hu").await;
    let team = common::create_team(&pool, AgeGroup::U12, Some(coach)).await;
    let player = common::create_player(&pool, Some(team.id), "Nagy").await;

    let service = FamilyService::new(pool.clone());
    service
        .link(CreateFamilyLink {
            parent_id: parent,
            player_id: player.id,
            relationship: Relationship::Father,
        })
        .await
        .expect("link parent");

    assert!(!service.parent_of(stranger, player.id).await.unwrap());

    let err = service
        .ensure_can_view(
            &session(stranger, UserRole::Parent),
            player.id,
            PrivacyCategory::Attendance,
        )
        .await
        .expect_err("stranger locked out");
    assert!(matches!(err, ApiError::Forbidden));
}

#[tokio::test]
async fn coaches_see_their_own_squad_admins_see_all() {
    let pool = common::test_pool().await;
    let coach = common::insert_user(&pool, UserRole::Coach, "edzo@akademia.hu").await;
    let other_coach = common::insert_user(&pool, UserRole::Coach, "masik.edzo@akademia.hu").await;
    let admin = common::insert_user(&pool, UserRole::Admin, "admin@akademia.hu").await;
    let team = common::create_team(&pool, AgeGroup::U15, Some(coach)).await;
    let player = common::create_player(&pool, Some(team.id), "Farkas").await;

    let service = FamilyService::new(pool.clone());

    assert!(service.coach_of_player(coach, player.id).await.unwrap());
    assert!(!service.coach_of_player(other_coach, player.id).await.unwrap());

    service
        .ensure_can_view(
            &session(coach, UserRole::Coach),
            player.id,
            PrivacyCategory::Medical,
        )
        .await
        .expect("own coach allowed");

    let err = service
        .ensure_can_view(
            &session(other_coach, UserRole::Coach),
            player.id,
            PrivacyCategory::Medical,
        )
        .await
        .expect_err("other coach blocked");
    assert!(matches!(err, ApiError::Forbidden));

    // Privacy flags do not gate staff.
    service
        .update_privacy(
            player.id,
            UpdatePrivacySettings {
                share_medical: Some(false),
                share_attendance: Some(false),
                share_development: Some(false),
            },
        )
        .await
        .expect("lock everything down");

    service
        .ensure_can_view(
            &session(admin, UserRole::Admin),
            player.id,
            PrivacyCategory::Medical,
        )
        .await
        .expect("admin always allowed");

    service
        .ensure_can_view(
            &session(coach, UserRole::Coach),
            player.id,
            PrivacyCategory::Medical,
        )
        .await
        .expect("own coach unaffected by family flags");
}

#[tokio::test]
async fn linking_rules_and_unlinking() {
    let pool = common::test_pool().await;
    let parent = common::insert_user(&pool, UserRole::Parent, "szulo@example.hu").await;
    let coach = common::insert_user(&pool, UserRole::Coach, "edzo@akademia.hu").await;
    let team = common::create_team(&pool, AgeGroup::U9, Some(coach)).await;
    let player = common::create_player(&pool, Some(team.id), "Balogh").await;

    let service = FamilyService::new(pool.clone());

    // Only parent accounts can be linked.
    let err = service
        .link(CreateFamilyLink {
            parent_id: coach,
            player_id: player.id,
            relationship: Relationship::Guardian,
        })
        .await
        .expect_err("coach is not a parent");
    assert!(matches!(err, ApiError::Validation(_)));

    // Unknown player is a 404, not a silent insert.
    let err = service
        .link(CreateFamilyLink {
            parent_id: parent,
            player_id: Uuid::new_v4(),
            relationship: Relationship::Mother,
        })
        .await
        .expect_err("unknown player");
    assert!(matches!(err, ApiError::NotFound));

    service
        .link(CreateFamilyLink {
            parent_id: parent,
            player_id: player.id,
            relationship: Relationship::Mother,
        })
        .await
        .expect("first link");

    let err = service
        .link(CreateFamilyLink {
            parent_id: parent,
            player_id: player.id,
            relationship: Relationship::Guardian,
        })
        .await
        .expect_err("duplicate link");
    assert!(matches!(err, ApiError::Conflict(_)));

    let children = service.children_of(parent).await.unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id, player.id);

    assert!(service.unlink(parent, player.id).await.unwrap());
    assert!(service.children_of(parent).await.unwrap().is_empty());
    assert!(!service.unlink(parent, player.id).await.unwrap());
}
