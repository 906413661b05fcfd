//! Liveness probe.

use actix_web::{HttpResponse, get};
use serde_json::json;

/// Report that the API process is up.
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service is running")),
    tags = ["health"],
    operation_id = "health"
)]
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "message": "MGNREGA API is running",
    }))
}
