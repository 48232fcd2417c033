//! Helpers shared by the route handlers.

use axum::response::Response;
use core::str::FromStr;

use stockwise_core::DomainError;

use crate::app::errors;

/// Parse a path or body identifier; malformed input is a 400.
pub fn parse_id<T>(value: &str) -> Result<T, Response>
where
    T: FromStr<Err = DomainError>,
{
    value.parse().map_err(errors::domain_error_to_response)
}

/// Parse a role name from a request body; unknown names are a 400.
pub fn parse_role(value: &str) -> Result<stockwise_auth::Role, Response> {
    value.parse().map_err(errors::domain_error_to_response)
}
