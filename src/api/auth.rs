use axum::{
    extract::{Path, Query, Request, State},
    middleware,
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::{AppState, PaginationQuery};
use crate::auth::{
    jwt_auth_middleware, require_role, AuthError, AuthResponse, AuthService, LoginRequest,
    MessageResponse, RefreshTokenRequest, RegisterRequest, TokenResponse, UserInfo, UserRole,
    UserSession,
};
use crate::models::UserResponse;
use crate::services::UserService;

/// Authentication routes
pub fn auth_routes(auth_service: AuthService) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh_token))
        .route("/logout", post(logout))
        .route(
            "/profile",
            get(get_profile).route_layer(middleware::from_fn_with_state(
                auth_service.clone(),
                jwt_auth_middleware,
            )),
        )
        .with_state(auth_service)
}

/// Register a new user
#[tracing::instrument(skip(auth_service, request))]
async fn register(
    State(auth_service): State<AuthService>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    let response = auth_service.register(request).await?;
    Ok(Json(response))
}

/// Login user
#[tracing::instrument(skip(auth_service, request))]
async fn login(
    State(auth_service): State<AuthService>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    let response = auth_service.login(request).await?;
    Ok(Json(response))
}

/// Refresh access token
#[tracing::instrument(skip(auth_service, request))]
async fn refresh_token(
    State(auth_service): State<AuthService>,
    Json(request): Json<RefreshTokenRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    let response = auth_service.refresh_token(request).await?;
    Ok(Json(response))
}

/// Logout user
#[tracing::instrument(skip(auth_service, request))]
async fn logout(
    State(auth_service): State<AuthService>,
    request: Request,
) -> Result<Json<MessageResponse>, AuthError> {
    let auth_header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(AuthError::MissingAuthHeader)?;

    let token = crate::auth::extract_bearer_token(auth_header)?;
    let response = auth_service.logout(token).await?;
    Ok(Json(response))
}

/// Get user profile
#[tracing::instrument(skip(auth_service, session))]
async fn get_profile(
    State(auth_service): State<AuthService>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<UserInfo>, AuthError> {
    let user_info = auth_service.get_user_info(session.user_id).await?;
    Ok(Json(user_info))
}

/// Admin endpoints: user management
pub fn admin_routes(state: AppState) -> Router {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id/role", put(update_user_role))
        .route("/users/:id", axum::routing::delete(delete_user))
        .route_layer(middleware::from_fn(require_role(UserRole::Admin)))
        .route_layer(middleware::from_fn_with_state(
            state.auth_service.clone(),
            jwt_auth_middleware,
        ))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct ListUsersQuery {
    role: Option<UserRole>,
    limit: Option<i64>,
    offset: Option<i64>,
}

/// List all users (admin only)
async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<ListUsersQuery>,
) -> Result<Json<Vec<UserResponse>>, AuthError> {
    let pagination = PaginationQuery {
        limit: params.limit,
        offset: params.offset,
    };

    let users = UserService::new(state.db.clone())
        .list_users(
            params.role,
            Some(pagination.get_limit()),
            Some(pagination.get_offset()),
        )
        .await?;

    Ok(Json(users))
}

#[derive(Debug, Deserialize)]
struct UpdateRoleRequest {
    role: UserRole,
}

/// Update user role (admin only)
async fn update_user_role(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdateRoleRequest>,
) -> Result<Json<UserResponse>, AuthError> {
    let user = UserService::new(state.db.clone())
        .update_role(user_id, request.role)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    Ok(Json(user))
}

/// Delete a user account (admin only)
async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AuthError> {
    let deleted = UserService::new(state.db.clone()).delete_user(user_id).await?;
    if !deleted {
        return Err(AuthError::UserNotFound);
    }

    Ok(Json(MessageResponse {
        message: "User deleted".to_string(),
    }))
}
