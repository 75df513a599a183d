//! Liveness handler

use actix_web::HttpResponse;

/// GET /status
///
/// Fixed liveness payload; makes no remote calls and is excluded from
/// the request log.
pub async fn status() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
}
