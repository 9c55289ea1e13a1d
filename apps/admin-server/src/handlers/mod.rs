//! HTTP handlers and route configuration.

mod categories;
mod comments;
mod health;
mod locations;
mod meta;
mod posts;
mod users;

use actix_web::{error, web};
use blogicum_core::domain::AdminMeta;
use blogicum_core::error::DomainError;
use uuid::Uuid;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/admin")
                    .route("/meta", web::get().to(meta::registry))
                    .service(
                        web::scope("/users")
                            .route("", web::get().to(users::list))
                            .route("", web::post().to(users::create))
                            .route("/{id}", web::get().to(users::get))
                            .route("/{id}", web::put().to(users::update))
                            .route("/{id}", web::delete().to(users::delete)),
                    )
                    .service(
                        web::scope("/categories")
                            .route("", web::get().to(categories::list))
                            .route("", web::post().to(categories::create))
                            .route("/{id}", web::get().to(categories::get))
                            .route("/{id}", web::put().to(categories::update))
                            .route("/{id}", web::delete().to(categories::delete)),
                    )
                    .service(
                        web::scope("/locations")
                            .route("", web::get().to(locations::list))
                            .route("", web::post().to(locations::create))
                            .route("/{id}", web::get().to(locations::get))
                            .route("/{id}", web::put().to(locations::update))
                            .route("/{id}", web::delete().to(locations::delete)),
                    )
                    .service(
                        web::scope("/posts")
                            .route("", web::get().to(posts::list))
                            .route("", web::post().to(posts::create))
                            // Registered ahead of `/{id}` so it is not read as an id.
                            .route("/visible", web::get().to(posts::list_visible))
                            .route("/{id}", web::get().to(posts::get))
                            .route("/{id}", web::put().to(posts::update))
                            .route("/{id}", web::delete().to(posts::delete))
                            .route("/{id}/comments", web::get().to(posts::comments)),
                    )
                    .service(
                        web::scope("/comments")
                            .route("", web::get().to(comments::list))
                            .route("", web::post().to(comments::create))
                            .route("/{id}", web::get().to(comments::get))
                            .route("/{id}", web::put().to(comments::update))
                            .route("/{id}", web::delete().to(comments::delete)),
                    ),
            ),
    );
}

/// JSON extractor config: malformed bodies become problem responses.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        error::InternalError::from_response(
            err,
            actix_web::ResponseError::error_response(&AppError::BadRequest(detail)),
        )
        .into()
    })
}

fn not_found<T: AdminMeta>(id: Uuid) -> AppError {
    DomainError::NotFound {
        entity_type: T::ENTITY,
        id,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use super::*;
    use crate::state::AppState;

    macro_rules! admin_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .app_data(json_config())
                    .configure(configure_routes),
            )
            .await
        };
    }

    macro_rules! post_json {
        ($app:expr, $uri:expr, $body:expr) => {{
            let req = test::TestRequest::post()
                .uri($uri)
                .set_json($body)
                .to_request();
            test::call_service(&$app, req).await
        }};
    }

    macro_rules! created_id {
        ($app:expr, $uri:expr, $body:expr) => {{
            let resp = post_json!($app, $uri, $body);
            assert_eq!(resp.status(), StatusCode::CREATED);
            let body: Value = test::read_body_json(resp).await;
            body["data"]["id"].as_str().unwrap().to_string()
        }};
    }

    macro_rules! get_json {
        ($app:expr, $uri:expr) => {{
            let req = test::TestRequest::get().uri($uri).to_request();
            let resp = test::call_service(&$app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            let body: Value = test::read_body_json(resp).await;
            body
        }};
    }

    macro_rules! delete {
        ($app:expr, $uri:expr) => {{
            let req = test::TestRequest::delete().uri($uri).to_request();
            test::call_service(&$app, req).await
        }};
    }

    #[actix_web::test]
    async fn health_reports_memory_storage() {
        let app = admin_app!(AppState::in_memory());

        let body = get_json!(app, "/api/health");
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "memory");
    }

    #[actix_web::test]
    async fn meta_lists_every_model() {
        let app = admin_app!(AppState::in_memory());

        let body = get_json!(app, "/api/admin/meta");
        let entities: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["entity"].as_str().unwrap())
            .collect();
        assert_eq!(entities, ["category", "location", "post", "comment", "user"]);

        let slug = body["data"][0]["fields"]
            .as_array()
            .unwrap()
            .iter()
            .find(|f| f["name"] == "slug")
            .unwrap();
        assert_eq!(slug["verbose_name"], "Identifier");
        assert!(slug["help_text"].as_str().unwrap().contains("underscore"));

        let pub_date = body["data"][2]["fields"]
            .as_array()
            .unwrap()
            .iter()
            .find(|f| f["name"] == "pub_date")
            .unwrap();
        assert!(pub_date["help_text"].as_str().unwrap().contains("future"));
    }

    #[actix_web::test]
    async fn create_and_fetch_category() {
        let app = admin_app!(AppState::in_memory());

        let id = created_id!(
            app,
            "/api/admin/categories",
            json!({"title": "Travel", "description": "Trips", "slug": "travel"})
        );

        let body = get_json!(app, &format!("/api/admin/categories/{id}"));
        assert_eq!(body["data"]["slug"], "travel");
        assert_eq!(body["data"]["is_published"], true);
    }

    #[actix_web::test]
    async fn duplicate_slug_is_a_conflict() {
        let app = admin_app!(AppState::in_memory());
        let form = json!({"title": "Travel", "description": "Trips", "slug": "travel"});

        created_id!(app, "/api/admin/categories", &form);
        let resp = post_json!(app, "/api/admin/categories", &form);
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn invalid_form_lists_field_errors() {
        let app = admin_app!(AppState::in_memory());

        let resp = post_json!(
            app,
            "/api/admin/categories",
            json!({"title": "", "description": "Trips", "slug": "not a slug"})
        );
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = test::read_body_json(resp).await;
        let fields: Vec<&str> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert!(fields.contains(&"title"));
        assert!(fields.contains(&"slug"));
    }

    #[actix_web::test]
    async fn malformed_json_is_a_bad_request() {
        let app = admin_app!(AppState::in_memory());

        let req = test::TestRequest::post()
            .uri("/api/admin/locations")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn missing_rows_are_not_found() {
        let app = admin_app!(AppState::in_memory());
        let id = Uuid::new_v4();

        let req = test::TestRequest::get()
            .uri(&format!("/api/admin/posts/{id}"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let resp = delete!(app, &format!("/api/admin/locations/{id}"));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn post_with_unknown_author_is_rejected() {
        let app = admin_app!(AppState::in_memory());

        let resp = post_json!(
            app,
            "/api/admin/posts",
            json!({
                "title": "Hello",
                "text": "World",
                "pub_date": "2024-05-01T12:00:00Z",
                "author_id": Uuid::new_v4(),
                "category_id": Uuid::new_v4(),
            })
        );
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn post_without_category_is_invalid() {
        let app = admin_app!(AppState::in_memory());

        let author = created_id!(app, "/api/admin/users", json!({"username": "leo"}));
        let resp = post_json!(
            app,
            "/api/admin/posts",
            json!({
                "title": "Hello",
                "text": "World",
                "pub_date": "2024-05-01T12:00:00Z",
                "author_id": author,
            })
        );
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["errors"][0]["field"], "category");

        let body = get_json!(app, "/api/admin/posts");
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn deleting_category_detaches_posts() {
        let app = admin_app!(AppState::in_memory());

        let author = created_id!(app, "/api/admin/users", json!({"username": "leo"}));
        let category = created_id!(
            app,
            "/api/admin/categories",
            json!({"title": "Travel", "description": "Trips", "slug": "travel"})
        );
        let post = created_id!(
            app,
            "/api/admin/posts",
            json!({
                "title": "Hello",
                "text": "World",
                "pub_date": "2024-05-01T12:00:00Z",
                "author_id": author,
                "category_id": category,
                "image": "sea.jpg",
            })
        );

        let body = get_json!(app, &format!("/api/admin/posts/{post}"));
        assert_eq!(body["data"]["image"], "posts_images/sea.jpg");

        let resp = delete!(app, &format!("/api/admin/categories/{category}"));
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let body = get_json!(app, &format!("/api/admin/posts/{post}"));
        assert_eq!(body["data"]["category_id"], Value::Null);
    }

    #[actix_web::test]
    async fn deleting_post_removes_its_comments() {
        let app = admin_app!(AppState::in_memory());

        let author = created_id!(app, "/api/admin/users", json!({"username": "leo"}));
        let category = created_id!(
            app,
            "/api/admin/categories",
            json!({"title": "Travel", "description": "Trips", "slug": "travel"})
        );
        let post = created_id!(
            app,
            "/api/admin/posts",
            json!({
                "title": "Hello",
                "text": "World",
                "pub_date": "2024-05-01T12:00:00Z",
                "author_id": author,
                "category_id": category,
            })
        );
        let comment = created_id!(
            app,
            "/api/admin/comments",
            json!({"text": "Nice", "author_id": author, "post_id": post})
        );

        let body = get_json!(app, &format!("/api/admin/posts/{post}/comments"));
        assert_eq!(body["data"][0]["id"], comment.as_str());

        let resp = delete!(app, &format!("/api/admin/posts/{post}"));
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri(&format!("/api/admin/comments/{comment}"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn post_list_is_newest_first_with_previews() {
        let app = admin_app!(AppState::in_memory());

        let author = created_id!(app, "/api/admin/users", json!({"username": "leo"}));
        let category = created_id!(
            app,
            "/api/admin/categories",
            json!({"title": "Travel", "description": "Trips", "slug": "travel"})
        );
        for (title, date) in [("old", "2024-01-01T00:00:00Z"), ("new", "2024-06-01T00:00:00Z")] {
            created_id!(
                app,
                "/api/admin/posts",
                json!({
                    "title": title,
                    "text": "ж".repeat(120),
                    "pub_date": date,
                    "author_id": author,
                    "category_id": category,
                })
            );
        }

        let body = get_json!(app, "/api/admin/posts");
        let rows = body["data"].as_array().unwrap();
        assert_eq!(rows[0]["title"], "new");
        assert_eq!(rows[1]["title"], "old");
        assert_eq!(rows[0]["short_text"].as_str().unwrap().chars().count(), 100);
        assert!(rows[0].get("text").is_none());
    }

    #[actix_web::test]
    async fn visible_list_hides_unpublished_categories() {
        let app = admin_app!(AppState::in_memory());

        let author = created_id!(app, "/api/admin/users", json!({"username": "leo"}));
        let open = created_id!(
            app,
            "/api/admin/categories",
            json!({"title": "Open", "description": "D", "slug": "open"})
        );
        let hidden = created_id!(
            app,
            "/api/admin/categories",
            json!({"title": "Hidden", "description": "D", "slug": "hidden", "is_published": false})
        );
        for (title, category) in [("shown", &open), ("hidden", &hidden)] {
            created_id!(
                app,
                "/api/admin/posts",
                json!({
                    "title": title,
                    "text": "Body",
                    "pub_date": "2024-01-01T00:00:00Z",
                    "author_id": author,
                    "category_id": category,
                })
            );
        }

        let body = get_json!(app, "/api/admin/posts/visible");
        let titles: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, ["shown"]);
    }
}
