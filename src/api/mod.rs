// API routes and handlers

pub mod attendance;
pub mod auth;
pub mod development_plans;
pub mod external_teams;
pub mod families;
pub mod health;
pub mod injuries;
pub mod matches;
pub mod players;
pub mod routes;
pub mod stats;
pub mod teams;
pub mod trainings;

use serde::Deserialize;
use sqlx::SqlitePool;

use crate::auth::{AuthService, UserRole, UserSession};
use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub auth_service: AuthService,
    pub checkin_ttl: chrono::Duration,
}

#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    /// Maximum number of items to return (default: 50, max: 100)
    pub limit: Option<i64>,
    /// Number of items to skip (default: 0)
    pub offset: Option<i64>,
}

impl PaginationQuery {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(limit) = self.limit {
            if !(1..=100).contains(&limit) {
                return Err("Limit must be between 1 and 100");
            }
        }
        if let Some(offset) = self.offset {
            if offset < 0 {
                return Err("Offset must be non-negative");
            }
        }
        Ok(())
    }

    pub fn get_limit(&self) -> i64 {
        self.limit.unwrap_or(50).clamp(1, 100)
    }

    pub fn get_offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Mutating endpoints are staff-only; parents and players get read access
/// through the family checks instead.
pub fn require_staff(session: &UserSession) -> Result<(), ApiError> {
    if session.role.can_access(&UserRole::Coach) {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults_and_clamping() {
        let q = PaginationQuery {
            limit: None,
            offset: None,
        };
        assert_eq!(q.get_limit(), 50);
        assert_eq!(q.get_offset(), 0);

        let q = PaginationQuery {
            limit: Some(500),
            offset: Some(-3),
        };
        assert!(q.validate().is_err());
        assert_eq!(q.get_limit(), 100);
        assert_eq!(q.get_offset(), 0);
    }
}
