use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tower_http::cors::{Any, CorsLayer};

use crate::auth::{extract_bearer_token, AuthError, AuthService, UserRole, UserSession};

/// JWT authentication middleware
pub async fn jwt_auth_middleware(
    State(auth_service): State<AuthService>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(AuthError::MissingAuthHeader)?;

    let token = extract_bearer_token(auth_header)?;

    let session = auth_service.validate_session(token).await?;

    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}

/// Role-based authorization middleware
pub fn require_role(
    required_role: UserRole,
) -> impl Fn(Request, Next) -> futures::future::BoxFuture<'static, Result<Response, AuthError>> + Clone
{
    move |request: Request, next: Next| {
        let required_role = required_role.clone();
        Box::pin(async move {
            let session = request
                .extensions()
                .get::<UserSession>()
                .ok_or(AuthError::InsufficientPermissions)?;

            if !session.role.can_access(&required_role) {
                return Err(AuthError::InsufficientPermissions);
            }

            Ok(next.run(request).await)
        })
    }
}

/// CORS configuration for the frontend
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Security headers middleware
pub fn security_headers_layer(
) -> tower_http::set_header::SetResponseHeaderLayer<axum::http::HeaderValue> {
    tower_http::set_header::SetResponseHeaderLayer::overriding(
        axum::http::header::HeaderName::from_static("x-content-type-options"),
        axum::http::HeaderValue::from_static("nosniff"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_permissions() {
        let admin = UserRole::Admin;
        let coach = UserRole::Coach;
        let parent = UserRole::Parent;
        let player = UserRole::Player;

        // Admin can access everything
        assert!(admin.can_access(&admin));
        assert!(admin.can_access(&coach));
        assert!(admin.can_access(&parent));
        assert!(admin.can_access(&player));

        // Coach can access everything except admin resources
        assert!(coach.can_access(&coach));
        assert!(coach.can_access(&parent));
        assert!(coach.can_access(&player));
        assert!(!coach.can_access(&admin));

        // Parents and players only see their own scope
        assert!(parent.can_access(&parent));
        assert!(!parent.can_access(&coach));
        assert!(player.can_access(&player));
        assert!(!player.can_access(&parent));
    }
}
