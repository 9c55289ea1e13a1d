//! Post admin handlers.

use actix_web::{HttpResponse, web};
use blogicum_core::ValidationErrors;
use blogicum_core::domain::{IMAGE_UPLOAD_DIR, Post};
use blogicum_shared::ApiResponse;
use blogicum_shared::dto::{PostForm, PostSummary};
use chrono::Utc;
use uuid::Uuid;

use super::not_found;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn summary(post: &Post) -> PostSummary {
    PostSummary {
        id: post.id,
        title: post.title.clone(),
        short_text: post.short_text().to_string(),
        pub_date: post.pub_date,
        author_id: post.author_id,
        category_id: post.category_id,
        location_id: post.location_id,
        is_published: post.is_published,
    }
}

/// Files given by bare name land in the upload directory.
fn stored_image(image: Option<String>) -> Option<String> {
    image.filter(|name| !name.is_empty()).map(|name| {
        if name.starts_with(&format!("{IMAGE_UPLOAD_DIR}/")) {
            name
        } else {
            Post::image_path(&name)
        }
    })
}

/// A post form must name a category; the column itself stays nullable.
fn check_form(form: &PostForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if form.category_id.is_none() {
        errors.add("category", "this field is required");
    }
    errors.into_result()
}

fn apply(post: &mut Post, form: PostForm) {
    post.title = form.title;
    post.text = form.text;
    post.pub_date = form.pub_date;
    post.author_id = form.author_id;
    post.location_id = form.location_id;
    post.category_id = form.category_id;
    post.is_published = form.is_published;
    post.image = stored_image(form.image);
}

/// GET /api/admin/posts
///
/// Newest first, with the text cut to its preview.
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await?;
    let rows: Vec<PostSummary> = posts.iter().map(summary).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(rows)))
}

/// GET /api/admin/posts/visible
pub async fn list_visible(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_visible(Utc::now()).await?;
    let rows: Vec<PostSummary> = posts.iter().map(summary).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(rows)))
}

/// GET /api/admin/posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found::<Post>(id))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// POST /api/admin/posts
pub async fn create(state: web::Data<AppState>, body: web::Json<PostForm>) -> AppResult<HttpResponse> {
    let form = body.into_inner();
    check_form(&form)?;
    let mut post = Post::new(form.author_id, String::new(), String::new(), form.pub_date);
    apply(&mut post, form);

    let saved = state.posts.create(post).await?;
    tracing::info!(post_id = %saved.id, author_id = %saved.author_id, "Post created");

    Ok(HttpResponse::Created().json(ApiResponse::ok(saved)))
}

/// PUT /api/admin/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let form = body.into_inner();
    check_form(&form)?;
    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found::<Post>(id))?;
    apply(&mut post, form);

    let saved = state.posts.update(post).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(saved)))
}

/// DELETE /api/admin/posts/{id}
///
/// Comments on the post go with it.
pub async fn delete(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete(id).await?;
    tracing::info!(post_id = %id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/admin/posts/{id}/comments
pub async fn comments(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    if state.posts.find_by_id(id).await?.is_none() {
        return Err(not_found::<Post>(id));
    }

    let comments = state.comments.find_by_post(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(comments)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_image_names_are_placed_in_upload_dir() {
        assert_eq!(
            stored_image(Some("cat.png".into())).as_deref(),
            Some("posts_images/cat.png")
        );
        assert_eq!(
            stored_image(Some("posts_images/cat.png".into())).as_deref(),
            Some("posts_images/cat.png")
        );
        assert_eq!(stored_image(Some(String::new())), None);
        assert_eq!(stored_image(None), None);
    }

    #[test]
    fn form_without_category_is_rejected() {
        let mut form = PostForm {
            title: "Hello".into(),
            text: "World".into(),
            pub_date: Utc::now(),
            author_id: Uuid::new_v4(),
            location_id: None,
            category_id: None,
            is_published: true,
            image: None,
        };

        let errors = check_form(&form).unwrap_err();
        assert!(errors.has("category"));

        form.category_id = Some(Uuid::new_v4());
        assert!(check_form(&form).is_ok());
    }

    #[test]
    fn summary_uses_preview_text() {
        let mut post = Post::new(Uuid::new_v4(), "T".into(), "x".repeat(150), Utc::now());
        post.category_id = Some(Uuid::new_v4());

        let row = summary(&post);
        assert_eq!(row.short_text.chars().count(), 100);
        assert_eq!(row.category_id, post.category_id);
    }
}
