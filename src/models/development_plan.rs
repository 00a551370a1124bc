use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PlanStatus {
    Active,
    Completed,
    Abandoned,
}

/// Per-player coaching goal with a progress percentage.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DevelopmentPlan {
    pub id: Uuid,
    pub player_id: Uuid,
    pub coach_id: Option<Uuid>,
    pub goal: String,
    pub focus_area: String,
    pub target_date: Option<NaiveDate>,
    pub progress_pct: i64,
    pub status: PlanStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateDevelopmentPlan {
    pub player_id: Uuid,
    pub coach_id: Option<Uuid>,
    pub goal: String,
    pub focus_area: String,
    pub target_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateDevelopmentPlan {
    pub goal: Option<String>,
    pub focus_area: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub progress_pct: Option<i64>,
    pub status: Option<PlanStatus>,
    pub notes: Option<String>,
}
