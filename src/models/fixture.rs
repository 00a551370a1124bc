use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Competition {
    League,
    Cup,
    Friendly,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Match {
    pub id: Uuid,
    pub team_id: Uuid,
    pub opponent_id: Uuid,
    pub kickoff_at: DateTime<Utc>,
    pub home: bool,
    pub competition: Competition,
    pub season: String,
    pub goals_for: Option<i64>,
    pub goals_against: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    /// Both goal columns are NULL until a result is recorded.
    pub fn is_played(&self) -> bool {
        self.goals_for.is_some() && self.goals_against.is_some()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMatch {
    pub team_id: Uuid,
    pub opponent_id: Uuid,
    pub kickoff_at: DateTime<Utc>,
    pub home: bool,
    pub competition: Competition,
    pub season: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateMatch {
    pub kickoff_at: Option<DateTime<Utc>>,
    pub home: Option<bool>,
    pub competition: Option<Competition>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchResult {
    pub goals_for: i64,
    pub goals_against: i64,
}
