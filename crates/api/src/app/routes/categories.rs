use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use stockwise_core::CategoryId;

use crate::app::routes::common::parse_id;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz;
use crate::context::AuthContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).put(update).delete(delete_one))
}

pub async fn list(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.categories.list().await {
        Ok(categories) => (StatusCode::OK, Json(categories)).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn get_one(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CategoryId = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.categories.get(id).await {
        Ok(category) => (StatusCode::OK, Json(category)).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Json(body): Json<dto::CategoryRequest>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_any(&ctx, authz::MANAGE) {
        return resp;
    }
    match services.categories.create(&body.name).await {
        Ok(category) => (StatusCode::CREATED, Json(category)).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::CategoryRequest>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_any(&ctx, authz::MANAGE) {
        return resp;
    }
    let id: CategoryId = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.categories.update(id, &body.name).await {
        Ok(category) => (StatusCode::OK, Json(category)).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn delete_one(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_any(&ctx, authz::ADMIN_ONLY) {
        return resp;
    }
    let id: CategoryId = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.categories.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}
