//! Comment admin handlers.

use actix_web::{HttpResponse, web};
use blogicum_core::domain::Comment;
use blogicum_shared::ApiResponse;
use blogicum_shared::dto::CommentForm;
use uuid::Uuid;

use super::not_found;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/admin/comments
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let comments = state.comments.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(comments)))
}

/// GET /api/admin/comments/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let comment = state
        .comments
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found::<Comment>(id))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(comment)))
}

/// POST /api/admin/comments
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CommentForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();
    let comment = Comment::new(form.post_id, form.author_id, form.text);

    let saved = state.comments.create(comment).await?;
    tracing::info!(comment_id = %saved.id, post_id = %saved.post_id, "Comment created");

    Ok(HttpResponse::Created().json(ApiResponse::ok(saved)))
}

/// PUT /api/admin/comments/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CommentForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let form = body.into_inner();
    let mut comment = state
        .comments
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found::<Comment>(id))?;
    comment.text = form.text;
    comment.author_id = form.author_id;
    comment.post_id = form.post_id;

    let saved = state.comments.update(comment).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(saved)))
}

/// DELETE /api/admin/comments/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.comments.delete(id).await?;

    Ok(HttpResponse::NoContent().finish())
}
