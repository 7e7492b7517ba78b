//! Health check handler.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::response::ApiResponse;

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct HealthResponse {
	pub status: String,
	pub timestamp: DateTime<Utc>,
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse)),
    tag = "health"
))]
/// GET /health - liveness probe
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
	ApiResponse::ok(HealthResponse {
		status: "ok".to_string(),
		timestamp: Utc::now(),
	})
}
