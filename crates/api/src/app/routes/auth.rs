use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use stockwise_auth::Role;

use crate::app::routes::common::parse_role;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::AuthContext;

/// Routes that require a valid token (`/api/auth/me`). Register and login
/// are mounted on the public router.
pub fn protected_router() -> Router {
    Router::new().route("/me", get(me))
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterRequest>,
) -> axum::response::Response {
    let role: Role = match parse_role(&body.role) {
        Ok(role) => role,
        Err(resp) => return resp,
    };

    match services.auth.register(&body.email, &body.password, role).await {
        Ok(authed) => (
            StatusCode::CREATED,
            Json(dto::auth_to_json(&authed.user, &authed.token)),
        )
            .into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    match services.auth.login(&body.email, &body.password).await {
        Ok(authed) => (
            StatusCode::OK,
            Json(dto::auth_to_json(&authed.user, &authed.token)),
        )
            .into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
) -> axum::response::Response {
    match services.auth.current_user(ctx.user_id()).await {
        Ok(user) => (StatusCode::OK, Json(dto::user_to_json(&user))).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}
