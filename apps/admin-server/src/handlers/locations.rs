//! Location admin handlers.

use actix_web::{HttpResponse, web};
use blogicum_core::domain::Location;
use blogicum_shared::ApiResponse;
use blogicum_shared::dto::LocationForm;
use uuid::Uuid;

use super::not_found;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/admin/locations
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let locations = state.locations.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(locations)))
}

/// GET /api/admin/locations/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let location = state
        .locations
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found::<Location>(id))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(location)))
}

/// POST /api/admin/locations
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<LocationForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();
    let mut location = Location::new(form.name);
    location.is_published = form.is_published;

    let saved = state.locations.create(location).await?;
    tracing::info!(location_id = %saved.id, "Location created");

    Ok(HttpResponse::Created().json(ApiResponse::ok(saved)))
}

/// PUT /api/admin/locations/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<LocationForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let form = body.into_inner();
    let mut location = state
        .locations
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found::<Location>(id))?;
    location.name = form.name;
    location.is_published = form.is_published;

    let saved = state.locations.update(location).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(saved)))
}

/// DELETE /api/admin/locations/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.locations.delete(id).await?;
    tracing::info!(location_id = %id, "Location deleted");

    Ok(HttpResponse::NoContent().finish())
}
