use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum DominantFoot {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PlayerStatus {
    Active,
    Injured,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Player {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub position: Position,
    pub dominant_foot: DominantFoot,
    pub height_cm: Option<i64>,
    pub weight_kg: Option<f64>,
    pub team_id: Option<Uuid>,
    pub status: PlayerStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Player {
    /// Hungarian name order: family name first.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePlayer {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub position: Position,
    pub dominant_foot: Option<DominantFoot>,
    pub height_cm: Option<i64>,
    pub weight_kg: Option<f64>,
    pub team_id: Option<Uuid>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdatePlayer {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<Position>,
    pub dominant_foot: Option<DominantFoot>,
    pub height_cm: Option<i64>,
    pub weight_kg: Option<f64>,
    pub team_id: Option<Uuid>,
    pub status: Option<PlayerStatus>,
}
