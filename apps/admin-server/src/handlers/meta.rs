use actix_web::HttpResponse;
use blogicum_core::domain::meta;
use blogicum_shared::ApiResponse;

/// Admin registration of every model: names and list columns.
///
/// GET /api/admin/meta
pub async fn registry() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(meta::registry()))
}
