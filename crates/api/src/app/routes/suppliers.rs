use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use stockwise_catalog::SupplierPatch;
use stockwise_core::SupplierId;

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

fn to_patch(body: dto::SupplierRequest) -> SupplierPatch {
    SupplierPatch {
        name: body.name,
        address: body.address,
        phone: body.phone,
        email: body.email,
    }
}

pub async fn list(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.suppliers.list().await {
        Ok(suppliers) => (StatusCode::OK, Json(suppliers)).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn get_one(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: SupplierId = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.suppliers.get(id).await {
        Ok(supplier) => (StatusCode::OK, Json(supplier)).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Json(body): Json<dto::SupplierRequest>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_any(&ctx, authz::MANAGE) {
        return resp;
    }
    match services.suppliers.create(to_patch(body)).await {
        Ok(supplier) => (StatusCode::CREATED, Json(supplier)).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::SupplierRequest>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_any(&ctx, authz::MANAGE) {
        return resp;
    }
    let id: SupplierId = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.suppliers.update(id, to_patch(body)).await {
        Ok(supplier) => (StatusCode::OK, Json(supplier)).into_response(),
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
    let id: SupplierId = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.suppliers.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}
