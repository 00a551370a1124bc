use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::{
    AuthError, AuthResponse, JwtService, LoginRequest, MessageResponse, RefreshTokenRequest,
    RegisterRequest, TokenResponse, UserInfo, UserRole, UserSession,
};
use crate::models::User;

#[derive(Debug, Clone)]
pub struct AuthService {
    jwt_service: JwtService,
    db: SqlitePool,
}

impl AuthService {
    pub fn new(db: SqlitePool, jwt_secret: &str) -> Self {
        Self {
            jwt_service: JwtService::new(jwt_secret),
            db,
        }
    }

    /// Register a new user
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AuthError> {
        let email = request.email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(AuthError::EmailValidation(format!(
                "'{}' is not a valid email address",
                email
            )));
        }

        if self.get_user_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = hash_password(&request.password)?;
        let role = request.role.unwrap_or(UserRole::Parent);
        let now = Utc::now();

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, password_hash, full_name, role, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING id, email, password_hash, full_name, role, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&email)
        .bind(&password_hash)
        .bind(request.full_name.trim())
        .bind(&role)
        .bind(now)
        .bind(now)
        .fetch_one(&self.db)
        .await
        .map_err(AuthError::Database)?;

        let (access_token, refresh_token) =
            self.jwt_service
                .create_token_pair(user.id, &user.email, role)?;

        self.store_refresh_token(user.id, &refresh_token).await?;

        Ok(self.auth_response(user, access_token, refresh_token))
    }

    /// Login user
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AuthError> {
        let email = request.email.trim().to_lowercase();
        let user = self
            .get_user_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let (access_token, refresh_token) =
            self.jwt_service
                .create_token_pair(user.id, &user.email, user.role.clone())?;

        self.store_refresh_token(user.id, &refresh_token).await?;

        Ok(self.auth_response(user, access_token, refresh_token))
    }

    /// Refresh access token
    pub async fn refresh_token(
        &self,
        request: RefreshTokenRequest,
    ) -> Result<TokenResponse, AuthError> {
        let claims = self.jwt_service.validate_token(&request.refresh_token)?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidToken)?;
        if !self
            .is_refresh_token_valid(user_id, &request.refresh_token)
            .await?
        {
            return Err(AuthError::InvalidToken);
        }

        let access_token =
            self.jwt_service
                .create_access_token(user_id, &claims.email, claims.role)?;

        Ok(TokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.access_token_expires_in_seconds(),
        })
    }

    /// Logout user (blacklist token, revoke refresh tokens)
    pub async fn logout(&self, token: &str) -> Result<MessageResponse, AuthError> {
        let claims = self.jwt_service.validate_token(token)?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidToken)?;

        self.blacklist_token(&claims.jti, claims.exp as i64).await?;
        self.revoke_user_refresh_tokens(user_id).await?;

        Ok(MessageResponse {
            message: "Successfully logged out".to_string(),
        })
    }

    /// Validate user session from token
    pub async fn validate_session(&self, token: &str) -> Result<UserSession, AuthError> {
        let session = self.jwt_service.extract_user_session(token)?;

        if self.is_token_blacklisted(&session.jti).await? {
            return Err(AuthError::InvalidToken);
        }

        Ok(session)
    }

    /// Load the stored profile for an authenticated user
    pub async fn get_user_info(&self, user_id: Uuid) -> Result<UserInfo, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, full_name, role, created_at, updated_at
             FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .map_err(AuthError::Database)?
        .ok_or(AuthError::UserNotFound)?;

        Ok(user_info(user))
    }

    pub async fn is_token_blacklisted(&self, jti: &str) -> Result<bool, AuthError> {
        let result = sqlx::query("SELECT 1 FROM token_blacklist WHERE jti = ? AND expires_at > ?")
            .bind(jti)
            .bind(Utc::now())
            .fetch_optional(&self.db)
            .await
            .map_err(AuthError::Database)?;

        Ok(result.is_some())
    }

    // Private helper methods

    fn auth_response(
        &self,
        user: User,
        access_token: String,
        refresh_token: String,
    ) -> AuthResponse {
        AuthResponse {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.access_token_expires_in_seconds(),
            user: user_info(user),
        }
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, full_name, role, created_at, updated_at
             FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .map_err(AuthError::Database)?;

        Ok(user)
    }

    async fn store_refresh_token(
        &self,
        user_id: Uuid,
        refresh_token: &str,
    ) -> Result<(), AuthError> {
        let claims = self.jwt_service.validate_token(refresh_token)?;
        let expires_at = chrono::DateTime::from_timestamp(claims.exp as i64, 0)
            .ok_or(AuthError::InvalidToken)?;

        sqlx::query(
            "INSERT INTO refresh_tokens (id, user_id, token_hash, expires_at, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(format!("{:x}", md5::compute(refresh_token)))
        .bind(expires_at)
        .bind(Utc::now())
        .execute(&self.db)
        .await
        .map_err(AuthError::Database)?;

        Ok(())
    }

    async fn is_refresh_token_valid(
        &self,
        user_id: Uuid,
        refresh_token: &str,
    ) -> Result<bool, AuthError> {
        let token_hash = format!("{:x}", md5::compute(refresh_token));

        let result = sqlx::query(
            "SELECT 1 FROM refresh_tokens
             WHERE user_id = ? AND token_hash = ? AND expires_at > ? AND revoked = 0",
        )
        .bind(user_id)
        .bind(token_hash)
        .bind(Utc::now())
        .fetch_optional(&self.db)
        .await
        .map_err(AuthError::Database)?;

        Ok(result.is_some())
    }

    async fn revoke_user_refresh_tokens(&self, user_id: Uuid) -> Result<(), AuthError> {
        sqlx::query("UPDATE refresh_tokens SET revoked = 1 WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.db)
            .await
            .map_err(AuthError::Database)?;

        Ok(())
    }

    async fn blacklist_token(&self, jti: &str, exp: i64) -> Result<(), AuthError> {
        let expires_at =
            chrono::DateTime::from_timestamp(exp, 0).ok_or(AuthError::InvalidToken)?;

        sqlx::query(
            "INSERT INTO token_blacklist (jti, expires_at, created_at) VALUES (?, ?, ?)
             ON CONFLICT (jti) DO NOTHING",
        )
        .bind(jti)
        .bind(expires_at)
        .bind(Utc::now())
        .execute(&self.db)
        .await
        .map_err(AuthError::Database)?;

        Ok(())
    }
}

fn user_info(user: User) -> UserInfo {
    UserInfo {
        id: user.id,
        email: user.email,
        full_name: user.full_name,
        role: user.role,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

fn is_valid_email(email: &str) -> bool {
    let email_regex = regex::Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("static regex");
    email_regex.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("edzo@akademia.hu"));
        assert!(is_valid_email("kovacs.jozsef@gmail.com"));
        assert!(!is_valid_email("nem-email"));
        assert!(!is_valid_email("@akademia.hu"));
        assert!(!is_valid_email("edzo@"));
        assert!(!is_valid_email(""));
    }
}
