use axum::Router;

pub mod auth;
pub mod categories;
pub mod common;
pub mod orders;
pub mod products;
pub mod suppliers;
pub mod system;
pub mod warehouse;

/// Router for all authenticated endpoints, mounted under `/api`.
pub fn router() -> Router {
    Router::new().nest(
        "/api",
        Router::new()
            .nest("/auth", auth::protected_router())
            .nest("/products", products::router())
            .nest("/categories", categories::router())
            .nest("/suppliers", suppliers::router())
            .nest("/warehouse", warehouse::router())
            .nest("/orders", orders::router()),
    )
}
