//! Request-side role checks.
//!
//! Authorization is enforced here at the handler boundary; services stay
//! role-agnostic.

use axum::http::StatusCode;
use axum::response::Response;

use stockwise_auth::Role;

use crate::app::errors::json_error;
use crate::context::AuthContext;

/// Catalog and order mutations.
pub const MANAGE: &[Role] = &[Role::Admin, Role::Manager];

/// Destructive catalog operations.
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Physical stock operations (receipt, write-off).
pub const STOCK_OPS: &[Role] = &[Role::Admin, Role::Manager, Role::Storekeeper];

/// Reject with 403 unless the caller holds one of the allowed roles.
pub fn require_any(ctx: &AuthContext, allowed: &[Role]) -> Result<(), Response> {
    if allowed.contains(&ctx.role()) {
        Ok(())
    } else {
        Err(json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            "role is not permitted to perform this operation",
        ))
    }
}
