use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::UserRole;
use crate::models::{User, UserResponse};

#[derive(Clone)]
pub struct UserService {
    db: SqlitePool,
}

impl UserService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn get_user_by_id(&self, user_id: Uuid) -> Result<Option<UserResponse>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, full_name, role, created_at, updated_at
             FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user.map(UserResponse::from))
    }

    pub async fn list_users(
        &self,
        role: Option<UserRole>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<UserResponse>> {
        let limit = limit.unwrap_or(50).clamp(1, 100);
        let offset = offset.unwrap_or(0).max(0);

        let mut query = String::from(
            "SELECT id, email, password_hash, full_name, role, created_at, updated_at FROM users",
        );
        if role.is_some() {
            query.push_str(" WHERE role = ?");
        }
        query.push_str(" ORDER BY created_at DESC LIMIT ? OFFSET ?");

        let mut query_builder = sqlx::query_as::<_, User>(&query);
        if let Some(role) = role {
            query_builder = query_builder.bind(role);
        }

        let users = query_builder
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.db)
            .await?;

        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn update_full_name(
        &self,
        user_id: Uuid,
        full_name: &str,
    ) -> Result<Option<UserResponse>> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET full_name = ?, updated_at = ? WHERE id = ?
             RETURNING id, email, password_hash, full_name, role, created_at, updated_at",
        )
        .bind(full_name)
        .bind(Utc::now())
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user.map(UserResponse::from))
    }

    pub async fn update_role(&self, user_id: Uuid, role: UserRole) -> Result<Option<UserResponse>> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET role = ?, updated_at = ? WHERE id = ?
             RETURNING id, email, password_hash, full_name, role, created_at, updated_at",
        )
        .bind(role)
        .bind(Utc::now())
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user.map(UserResponse::from))
    }

    pub async fn delete_user(&self, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
