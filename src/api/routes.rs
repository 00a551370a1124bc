use axum::{middleware, routing::get, Router};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use super::auth::{admin_routes, auth_routes};
use super::health::health_check;
use super::{
    attendance, development_plans, external_teams, families, injuries, matches, players, stats,
    teams, trainings, AppState,
};
use crate::auth::{cors_layer, jwt_auth_middleware, security_headers_layer, AuthService};
use crate::config::AppConfig;

pub fn create_routes(db: SqlitePool, config: &AppConfig) -> Router {
    let auth_service = AuthService::new(db.clone(), &config.jwt_secret);
    let state = AppState {
        db,
        auth_service: auth_service.clone(),
        checkin_ttl: config.checkin_ttl(),
    };

    // Everything merged before the auth layer sits behind the login wall;
    // the QR scan endpoint is merged after it on purpose.
    let api = Router::new()
        .merge(teams::routes())
        .merge(players::routes())
        .merge(external_teams::routes())
        .merge(matches::routes())
        .merge(trainings::routes())
        .merge(attendance::routes())
        .merge(injuries::routes())
        .merge(development_plans::routes())
        .merge(families::routes())
        .merge(stats::routes())
        .layer(middleware::from_fn_with_state(
            auth_service.clone(),
            jwt_auth_middleware,
        ))
        .merge(attendance::public_routes())
        .with_state(state.clone());

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes(auth_service))
        .nest("/api/admin", admin_routes(state))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(security_headers_layer())
        .layer(cors_layer())
}
