//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub storage: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

/// Health check endpoint - returns server and storage status.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let status = match &state.db {
        #[cfg(feature = "postgres")]
        Some(db) => match db.ping().await {
            Ok(()) => "ok",
            Err(e) => {
                tracing::warn!("Database ping failed: {}", e);
                "degraded"
            }
        },
        _ => "ok",
    };

    let response = HealthResponse {
        status,
        storage: state.storage(),
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    if status == "ok" {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
