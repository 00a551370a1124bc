use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Age cohorts fielded by the academy, youngest to oldest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, sqlx::Type)]
pub enum AgeGroup {
    U8,
    U9,
    U10,
    U11,
    U12,
    U13,
    U14,
    U15,
    U16,
    U17,
    U18,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 11] = [
        AgeGroup::U8,
        AgeGroup::U9,
        AgeGroup::U10,
        AgeGroup::U11,
        AgeGroup::U12,
        AgeGroup::U13,
        AgeGroup::U14,
        AgeGroup::U15,
        AgeGroup::U16,
        AgeGroup::U17,
        AgeGroup::U18,
    ];

    pub fn age(&self) -> i32 {
        match self {
            AgeGroup::U8 => 8,
            AgeGroup::U9 => 9,
            AgeGroup::U10 => 10,
            AgeGroup::U11 => 11,
            AgeGroup::U12 => 12,
            AgeGroup::U13 => 13,
            AgeGroup::U14 => 14,
            AgeGroup::U15 => 15,
            AgeGroup::U16 => 16,
            AgeGroup::U17 => 17,
            AgeGroup::U18 => 18,
        }
    }

    pub fn from_age(age: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|g| g.age() == age)
    }

    /// The group a player moves into at the next season rollover.
    pub fn next(&self) -> Option<Self> {
        Self::from_age(self.age() + 1)
    }

    /// Birth year of the cohort for a season starting in `season_start_year`.
    pub fn birth_year(&self, season_start_year: i32) -> i32 {
        season_start_year - self.age()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::U8 => "U8",
            AgeGroup::U9 => "U9",
            AgeGroup::U10 => "U10",
            AgeGroup::U11 => "U11",
            AgeGroup::U12 => "U12",
            AgeGroup::U13 => "U13",
            AgeGroup::U14 => "U14",
            AgeGroup::U15 => "U15",
            AgeGroup::U16 => "U16",
            AgeGroup::U17 => "U17",
            AgeGroup::U18 => "U18",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TeamStatus {
    Active,
    Archived,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub age_group: AgeGroup,
    pub season: String,
    pub coach_id: Option<Uuid>,
    pub status: TeamStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTeam {
    pub name: String,
    pub age_group: AgeGroup,
    pub season: String,
    pub coach_id: Option<Uuid>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateTeam {
    pub name: Option<String>,
    pub coach_id: Option<Uuid>,
    pub status: Option<TeamStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_group_progression() {
        assert_eq!(AgeGroup::U8.next(), Some(AgeGroup::U9));
        assert_eq!(AgeGroup::U17.next(), Some(AgeGroup::U18));
        assert_eq!(AgeGroup::U18.next(), None);
    }

    #[test]
    fn test_cohort_birth_year() {
        // A U12 squad in the season starting 2025 is the 2013 cohort.
        assert_eq!(AgeGroup::U12.birth_year(2025), 2013);
        assert_eq!(AgeGroup::U8.birth_year(2025), 2017);
    }
}
