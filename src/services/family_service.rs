use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::{UserRole, UserSession};
use crate::error::ApiError;
use crate::models::{
    CreateFamilyLink, FamilyPrivacySettings, ParentChildRelationship, Player, PrivacyCategory,
    UpdatePrivacySettings, User,
};

/// Parent↔child links, per-player privacy flags and the access checks
/// built on them. Coaches see their own squads, admins see everything,
/// parents see what the privacy flags allow.
#[derive(Clone)]
pub struct FamilyService {
    db: SqlitePool,
}

impl FamilyService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn link(
        &self,
        data: CreateFamilyLink,
    ) -> Result<ParentChildRelationship, ApiError> {
        let parent = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, full_name, role, created_at, updated_at
             FROM users WHERE id = ?",
        )
        .bind(data.parent_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ApiError::NotFound)?;

        if parent.role != UserRole::Parent {
            return Err(ApiError::Validation(
                "Linked user must have the parent role".to_string(),
            ));
        }

        let player_exists: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM players WHERE id = ?")
                .bind(data.player_id)
                .fetch_optional(&self.db)
                .await?;
        if player_exists.is_none() {
            return Err(ApiError::NotFound);
        }

        if self.parent_of(data.parent_id, data.player_id).await? {
            return Err(ApiError::Conflict(
                "Parent is already linked to this player".to_string(),
            ));
        }

        let now = Utc::now();
        let link = sqlx::query_as::<_, ParentChildRelationship>(
            "INSERT INTO parent_child_relationships (id, parent_id, player_id, relationship, created_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING id, parent_id, player_id, relationship, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(data.parent_id)
        .bind(data.player_id)
        .bind(data.relationship)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        // First link also materializes the default privacy row.
        sqlx::query(
            "INSERT OR IGNORE INTO family_privacy_settings
                 (player_id, share_medical, share_attendance, share_development, updated_at)
             VALUES (?, 1, 1, 1, ?)",
        )
        .bind(data.player_id)
        .bind(now)
        .execute(&self.db)
        .await?;

        Ok(link)
    }

    pub async fn unlink(&self, parent_id: Uuid, player_id: Uuid) -> Result<bool, ApiError> {
        let result = sqlx::query(
            "DELETE FROM parent_child_relationships WHERE parent_id = ? AND player_id = ?",
        )
        .bind(parent_id)
        .bind(player_id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn children_of(&self, parent_id: Uuid) -> Result<Vec<Player>, ApiError> {
        let players = sqlx::query_as::<_, Player>(
            "SELECT p.id, p.first_name, p.last_name, p.birth_date, p.position, p.dominant_foot,
                    p.height_cm, p.weight_kg, p.team_id, p.status, p.created_at, p.updated_at
             FROM players p
             JOIN parent_child_relationships r ON r.player_id = p.id
             WHERE r.parent_id = ?
             ORDER BY p.last_name, p.first_name",
        )
        .bind(parent_id)
        .fetch_all(&self.db)
        .await?;

        Ok(players)
    }

    pub async fn links_for_player(
        &self,
        player_id: Uuid,
    ) -> Result<Vec<ParentChildRelationship>, ApiError> {
        let links = sqlx::query_as::<_, ParentChildRelationship>(
            "SELECT id, parent_id, player_id, relationship, created_at
             FROM parent_child_relationships WHERE player_id = ? ORDER BY created_at",
        )
        .bind(player_id)
        .fetch_all(&self.db)
        .await?;

        Ok(links)
    }

    /// Stored settings, or the all-shared defaults when no row exists yet.
    pub async fn privacy_settings(
        &self,
        player_id: Uuid,
    ) -> Result<FamilyPrivacySettings, ApiError> {
        let settings = sqlx::query_as::<_, FamilyPrivacySettings>(
            "SELECT player_id, share_medical, share_attendance, share_development, updated_at
             FROM family_privacy_settings WHERE player_id = ?",
        )
        .bind(player_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(settings.unwrap_or(FamilyPrivacySettings {
            player_id,
            share_medical: true,
            share_attendance: true,
            share_development: true,
            updated_at: Utc::now(),
        }))
    }

    pub async fn update_privacy(
        &self,
        player_id: Uuid,
        data: UpdatePrivacySettings,
    ) -> Result<FamilyPrivacySettings, ApiError> {
        let current = self.privacy_settings(player_id).await?;

        let settings = sqlx::query_as::<_, FamilyPrivacySettings>(
            "INSERT INTO family_privacy_settings
                 (player_id, share_medical, share_attendance, share_development, updated_at)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT (player_id) DO UPDATE SET
                 share_medical = excluded.share_medical,
                 share_attendance = excluded.share_attendance,
                 share_development = excluded.share_development,
                 updated_at = excluded.updated_at
             RETURNING player_id, share_medical, share_attendance, share_development, updated_at",
        )
        .bind(player_id)
        .bind(data.share_medical.unwrap_or(current.share_medical))
        .bind(data.share_attendance.unwrap_or(current.share_attendance))
        .bind(data.share_development.unwrap_or(current.share_development))
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(settings)
    }

    pub async fn parent_of(&self, parent_id: Uuid, player_id: Uuid) -> Result<bool, ApiError> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT 1 FROM parent_child_relationships WHERE parent_id = ? AND player_id = ?",
        )
        .bind(parent_id)
        .bind(player_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.is_some())
    }

    /// Relationship row AND the matching privacy flag.
    pub async fn parent_can_view(
        &self,
        parent_id: Uuid,
        player_id: Uuid,
        category: PrivacyCategory,
    ) -> Result<bool, ApiError> {
        if !self.parent_of(parent_id, player_id).await? {
            return Ok(false);
        }

        let settings = self.privacy_settings(player_id).await?;
        let allowed = match category {
            PrivacyCategory::Medical => settings.share_medical,
            PrivacyCategory::Attendance => settings.share_attendance,
            PrivacyCategory::Development => settings.share_development,
        };

        Ok(allowed)
    }

    pub async fn coach_of_player(
        &self,
        coach_id: Uuid,
        player_id: Uuid,
    ) -> Result<bool, ApiError> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT 1 FROM players p JOIN teams t ON t.id = p.team_id
             WHERE p.id = ? AND t.coach_id = ?",
        )
        .bind(player_id)
        .bind(coach_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.is_some())
    }

    /// Gate a read of player data for the authenticated session.
    pub async fn ensure_can_view(
        &self,
        session: &UserSession,
        player_id: Uuid,
        category: PrivacyCategory,
    ) -> Result<(), ApiError> {
        match session.role {
            UserRole::Admin => Ok(()),
            UserRole::Coach => {
                if self.coach_of_player(session.user_id, player_id).await? {
                    Ok(())
                } else {
                    Err(ApiError::Forbidden)
                }
            }
            UserRole::Parent => {
                if self
                    .parent_can_view(session.user_id, player_id, category)
                    .await?
                {
                    Ok(())
                } else {
                    Err(ApiError::Forbidden)
                }
            }
            UserRole::Player => Err(ApiError::Forbidden),
        }
    }
}
