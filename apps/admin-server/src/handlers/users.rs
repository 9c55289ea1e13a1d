//! User admin handlers.
//!
//! Accounts themselves are managed by the identity provider; the admin
//! console only mirrors the rows posts and comments point at.

use actix_web::{HttpResponse, web};
use blogicum_core::domain::User;
use blogicum_shared::ApiResponse;
use blogicum_shared::dto::UserForm;
use uuid::Uuid;

use super::not_found;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users = state.users.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(users)))
}

/// GET /api/admin/users/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found::<User>(id))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(user)))
}

/// POST /api/admin/users
pub async fn create(state: web::Data<AppState>, body: web::Json<UserForm>) -> AppResult<HttpResponse> {
    let form = body.into_inner();
    let saved = state.users.create(User::new(form.username, form.email)).await?;
    tracing::info!(user_id = %saved.id, "User created");

    Ok(HttpResponse::Created().json(ApiResponse::ok(saved)))
}

/// PUT /api/admin/users/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UserForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let form = body.into_inner();
    let mut user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found::<User>(id))?;
    user.username = form.username;
    user.email = form.email;

    let saved = state.users.update(user).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(saved)))
}

/// DELETE /api/admin/users/{id}
///
/// Also removes every post and comment the user wrote.
pub async fn delete(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.users.delete(id).await?;
    tracing::info!(user_id = %id, "User deleted with their posts and comments");

    Ok(HttpResponse::NoContent().finish())
}
