//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: service construction over the SQLite repositories
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, routing::post, Extension, Router};
use tower::ServiceBuilder;

use stockwise_auth::TokenManager;
use stockwise_store::Database;

use crate::config::Config;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &Config, db: Database) -> Router {
    let tokens = TokenManager::new(config.jwt_secret.clone(), config.token_ttl);
    let auth_state = middleware::AuthState {
        tokens: tokens.clone(),
    };

    let services = Arc::new(services::build_services(&db, tokens));

    // Protected routes: require a validated bearer token.
    let protected = routes::router()
        .layer(Extension(services.clone()))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    // Public surface: health probe and the two credential endpoints.
    let public = Router::new()
        .route("/health", get(routes::system::health))
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .layer(Extension(services))
        .layer(Extension(db));

    public.merge(protected).layer(ServiceBuilder::new())
}
