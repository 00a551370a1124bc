use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum InjurySeverity {
    Minor,
    Moderate,
    Severe,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum InjuryStatus {
    Recovering,
    Recovered,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Injury {
    pub id: Uuid,
    pub player_id: Uuid,
    pub description: String,
    pub body_part: String,
    pub severity: InjurySeverity,
    pub injured_on: NaiveDate,
    pub expected_return: Option<NaiveDate>,
    pub status: InjuryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateInjury {
    pub player_id: Uuid,
    pub description: String,
    pub body_part: String,
    pub severity: InjurySeverity,
    pub injured_on: NaiveDate,
    pub expected_return: Option<NaiveDate>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateInjury {
    pub description: Option<String>,
    pub expected_return: Option<NaiveDate>,
    pub status: Option<InjuryStatus>,
}
