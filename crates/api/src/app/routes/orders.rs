use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use stockwise_core::OrderId;
use stockwise_orders::{OrderItem, OrderStatus};

use crate::app::routes::common::parse_id;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz;
use crate::context::AuthContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one))
        .route("/:id/status", put(update_status))
}

pub async fn list(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.orders.list().await {
        Ok(orders) => (StatusCode::OK, Json(orders)).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn get_one(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: OrderId = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.orders.get(id).await {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Json(body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_any(&ctx, authz::MANAGE) {
        return resp;
    }

    let mut items = Vec::with_capacity(body.items.len());
    for item in &body.items {
        let product_id = match parse_id(&item.product_id) {
            Ok(id) => id,
            Err(resp) => return resp,
        };
        items.push(OrderItem {
            product_id,
            quantity: item.quantity,
            price: item.price,
        });
    }

    match services.orders.create(&body.customer, items).await {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn update_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateOrderStatusRequest>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_any(&ctx, authz::MANAGE) {
        return resp;
    }
    let id: OrderId = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let status = match body.status.parse::<OrderStatus>() {
        Ok(status) => status,
        Err(err) => return errors::domain_error_to_response(err),
    };

    match services.orders.update_status(id, status).await {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}
