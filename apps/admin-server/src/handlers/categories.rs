//! Category admin handlers.

use actix_web::{HttpResponse, web};
use blogicum_core::domain::Category;
use blogicum_shared::ApiResponse;
use blogicum_shared::dto::CategoryForm;
use uuid::Uuid;

use super::not_found;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn apply(category: &mut Category, form: CategoryForm) {
    category.title = form.title;
    category.description = form.description;
    category.slug = form.slug;
    category.is_published = form.is_published;
}

/// GET /api/admin/categories
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.categories.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(categories)))
}

/// GET /api/admin/categories/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let category = state
        .categories
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found::<Category>(id))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(category)))
}

/// POST /api/admin/categories
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CategoryForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();
    let mut category = Category::new(String::new(), String::new(), String::new());
    apply(&mut category, form);

    let saved = state.categories.create(category).await?;
    tracing::info!(category_id = %saved.id, slug = %saved.slug, "Category created");

    Ok(HttpResponse::Created().json(ApiResponse::ok(saved)))
}

/// PUT /api/admin/categories/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CategoryForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let mut category = state
        .categories
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found::<Category>(id))?;
    apply(&mut category, body.into_inner());

    let saved = state.categories.update(category).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(saved)))
}

/// DELETE /api/admin/categories/{id}
///
/// Posts filed under the category stay, without a category.
pub async fn delete(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.categories.delete(id).await?;
    tracing::info!(category_id = %id, "Category deleted");

    Ok(HttpResponse::NoContent().finish())
}
