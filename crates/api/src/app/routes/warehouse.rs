use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use stockwise_core::{OrderId, ProductId, SupplierId};

use crate::app::routes::common::parse_id;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz;
use crate::context::AuthContext;

pub fn router() -> Router {
    Router::new()
        .route("/receipt", post(receipt))
        .route("/write-off", post(write_off))
        .route("/reserve", post(reserve))
        .route("/inventory", get(inventory))
}

pub async fn receipt(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Json(body): Json<dto::ReceiptRequest>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_any(&ctx, authz::STOCK_OPS) {
        return resp;
    }
    let product_id: ProductId = match parse_id(&body.product_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let supplier_id = match body.supplier_id.as_deref().map(parse_id::<SupplierId>).transpose() {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services
        .warehouse
        .receipt(product_id, supplier_id, body.quantity, body.price, body.expiry_date)
        .await
    {
        Ok(movement) => (StatusCode::CREATED, Json(movement)).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn write_off(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Json(body): Json<dto::WriteOffRequest>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_any(&ctx, authz::STOCK_OPS) {
        return resp;
    }
    let product_id: ProductId = match parse_id(&body.product_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.warehouse.write_off(product_id, body.quantity).await {
        Ok(movement) => (StatusCode::CREATED, Json(movement)).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn reserve(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Json(body): Json<dto::ReserveRequest>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_any(&ctx, authz::MANAGE) {
        return resp;
    }
    let product_id: ProductId = match parse_id(&body.product_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let order_id: OrderId = match parse_id(&body.order_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services
        .warehouse
        .reserve(product_id, order_id, body.quantity)
        .await
    {
        Ok(movement) => (StatusCode::CREATED, Json(movement)).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn inventory(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.warehouse.inventory().await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}
