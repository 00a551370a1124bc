use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Relationship {
    Mother,
    Father,
    Guardian,
}

/// Link between a parent account and a player record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ParentChildRelationship {
    pub id: Uuid,
    pub parent_id: Uuid,
    pub player_id: Uuid,
    pub relationship: Relationship,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateFamilyLink {
    pub parent_id: Uuid,
    pub player_id: Uuid,
    pub relationship: Relationship,
}

/// Per-player switches controlling what linked parents may see.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FamilyPrivacySettings {
    pub player_id: Uuid,
    pub share_medical: bool,
    pub share_attendance: bool,
    pub share_development: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdatePrivacySettings {
    pub share_medical: Option<bool>,
    pub share_attendance: Option<bool>,
    pub share_development: Option<bool>,
}

/// Data category a parent is asking for, checked against the privacy flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivacyCategory {
    Medical,
    Attendance,
    Development,
}
