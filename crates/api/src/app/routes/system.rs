use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use stockwise_store::Database;

/// Public liveness probe; checks the database answers a trivial query.
pub async fn health(Extension(db): Extension<Database>) -> axum::response::Response {
    if db.health_check().await {
        (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response()
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded" })),
        )
            .into_response()
    }
}
