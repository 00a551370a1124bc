use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::AgeGroup;

/// Opponent club outside the academy, kept as a lightweight record for
/// fixture generation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExternalTeam {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub age_group: AgeGroup,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateExternalTeam {
    pub name: String,
    pub city: String,
    pub age_group: AgeGroup,
}
