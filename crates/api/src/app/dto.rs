//! Request/response DTOs and JSON mapping helpers.
//!
//! Identifiers arrive as plain strings and are parsed in the handlers so a
//! malformed id is a 400, not a deserialization failure. Domain models
//! serialize directly where they are safe to expose; users get a dedicated
//! shape because the password hash must never leave the backend.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use stockwise_auth::User;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub category_id: String,
    pub supplier_id: Option<String>,
    pub unit: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SupplierRequest {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReceiptRequest {
    pub product_id: String,
    pub supplier_id: Option<String>,
    pub quantity: f64,
    pub price: Option<f64>,
    pub expiry_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct WriteOffRequest {
    pub product_id: String,
    pub quantity: f64,
}

#[derive(Debug, Deserialize)]
pub struct ReserveRequest {
    pub product_id: String,
    pub order_id: String,
    pub quantity: f64,
}

#[derive(Debug, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: String,
    pub quantity: f64,
    pub price: f64,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub customer: String,
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

pub fn user_to_json(user: &User) -> Value {
    json!({
        "id": user.id,
        "email": user.email,
        "role": user.role,
        "created_at": user.created_at,
        "updated_at": user.updated_at,
    })
}

pub fn auth_to_json(user: &User, token: &str) -> Value {
    json!({
        "token": token,
        "user": user_to_json(user),
    })
}
