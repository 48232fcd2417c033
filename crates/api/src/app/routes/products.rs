use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use stockwise_catalog::{NewProduct, ProductPatch, Unit};
use stockwise_core::{CategoryId, ProductId, SupplierId};

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

fn parse_fields(
    body: &dto::ProductRequest,
) -> Result<(CategoryId, Option<SupplierId>, Unit), axum::response::Response> {
    let category_id = parse_id(&body.category_id)?;
    let supplier_id = body
        .supplier_id
        .as_deref()
        .map(parse_id::<SupplierId>)
        .transpose()?;
    let unit = body
        .unit
        .parse::<Unit>()
        .map_err(errors::domain_error_to_response)?;
    Ok((category_id, supplier_id, unit))
}

pub async fn list(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.products.list().await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn get_one(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.products.get(id).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Json(body): Json<dto::ProductRequest>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_any(&ctx, authz::MANAGE) {
        return resp;
    }
    let (category_id, supplier_id, unit) = match parse_fields(&body) {
        Ok(parsed) => parsed,
        Err(resp) => return resp,
    };

    let input = NewProduct {
        sku: body.sku,
        name: body.name,
        description: body.description,
        category_id,
        supplier_id,
        unit,
    };
    match services.products.create(input).await {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::ProductRequest>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_any(&ctx, authz::MANAGE) {
        return resp;
    }
    let id: ProductId = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let (category_id, supplier_id, unit) = match parse_fields(&body) {
        Ok(parsed) => parsed,
        Err(resp) => return resp,
    };

    let patch = ProductPatch {
        sku: body.sku,
        name: body.name,
        description: body.description,
        category_id,
        supplier_id,
        unit,
    };
    match services.products.update(id, patch).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
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
    let id: ProductId = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.products.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}
