//! Blog resource handlers.

use actix_web::{HttpResponse, web};

use bloglist_core::domain::{BlogDraft, parse_blog_id};
use bloglist_core::error::DomainError;
use bloglist_core::stats::BlogStats;
use bloglist_shared::dto::BlogPayload;

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn draft_from(payload: BlogPayload) -> Result<BlogDraft, DomainError> {
    BlogDraft::new(payload.title, payload.author, payload.url, payload.likes)
}

/// GET /api/blogs
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let blogs = state.store(state.blogs.find_all()).await?;

    Ok(HttpResponse::Ok().json(blogs))
}

/// GET /api/blogs/stats
pub async fn stats(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let blogs = state.store(state.blogs.find_all()).await?;

    Ok(HttpResponse::Ok().json(BlogStats::from_blogs(&blogs)))
}

/// GET /api/blogs/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = parse_blog_id(&path)?;

    let blog = state
        .store(state.blogs.find_by_id(id))
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "Blog",
            id,
        })?;

    Ok(HttpResponse::Ok().json(blog))
}

/// POST /api/blogs
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<BlogPayload>,
) -> AppResult<HttpResponse> {
    let draft = draft_from(body.into_inner())?;

    let blog = state.store(state.blogs.create(draft)).await?;
    tracing::info!(blog_id = %blog.id, "Blog created");

    Ok(HttpResponse::Ok().json(blog))
}

/// PUT /api/blogs/{id}
pub async fn replace(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<BlogPayload>,
) -> AppResult<HttpResponse> {
    let id = parse_blog_id(&path)?;
    let draft = draft_from(body.into_inner())?;

    let blog = state
        .store(state.blogs.replace(id, draft))
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "Blog",
            id,
        })?;

    Ok(HttpResponse::Ok().json(blog))
}

/// DELETE /api/blogs/{id}
///
/// Answers 204 whether or not the blog existed.
pub async fn delete(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = parse_blog_id(&path)?;

    let removed = state.store(state.blogs.delete(id)).await?;
    tracing::debug!(blog_id = %id, removed, "Blog delete handled");

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use actix_web::{App, http::StatusCode, test};
    use async_trait::async_trait;
    use bloglist_core::domain::Blog;
    use bloglist_core::error::RepoError;
    use bloglist_core::ports::{BaseRepository, BlogRepository};
    use bloglist_infra::InMemoryBlogRepository;
    use serde_json::{Value, json};

    use super::*;

    fn seed() -> Vec<Blog> {
        [
            ("React patterns", "Michael Chan", "https://reactpatterns.com/", 7),
            (
                "Go To Statement Considered Harmful",
                "Edsger W. Dijkstra",
                "http://www.u.arizona.edu/~rubinson/copyright_violations/Go_To_Considered_Harmful.html",
                5,
            ),
            (
                "Canonical string reduction",
                "Edsger W. Dijkstra",
                "http://www.cs.utexas.edu/~EWD/transcriptions/EWD08xx/EWD808.html",
                12,
            ),
        ]
        .into_iter()
        .map(|(title, author, url, likes)| {
            Blog::new(
                BlogDraft::new(
                    Some(title.to_string()),
                    Some(author.to_string()),
                    Some(url.to_string()),
                    Some(likes),
                )
                .unwrap(),
            )
        })
        .collect()
    }

    fn state(blogs: Vec<Blog>) -> AppState {
        AppState::with_repository(
            Arc::new(InMemoryBlogRepository::with_blogs(blogs)),
            Duration::from_secs(5),
        )
    }

    /// A record store whose every call fails, or never answers when `stall` is set.
    struct BrokenBlogRepository {
        stall: bool,
    }

    impl BrokenBlogRepository {
        async fn answer<T>(&self) -> Result<T, RepoError> {
            if self.stall {
                std::future::pending::<()>().await;
            }
            Err(RepoError::Query("relation \"blogs\" does not exist".to_string()))
        }
    }

    #[async_trait]
    impl BaseRepository<Blog, uuid::Uuid> for BrokenBlogRepository {
        async fn find_all(&self) -> Result<Vec<Blog>, RepoError> {
            self.answer().await
        }

        async fn find_by_id(&self, _id: uuid::Uuid) -> Result<Option<Blog>, RepoError> {
            self.answer().await
        }

        async fn insert(&self, _blog: Blog) -> Result<Blog, RepoError> {
            self.answer().await
        }

        async fn update(&self, _blog: Blog) -> Result<Option<Blog>, RepoError> {
            self.answer().await
        }

        async fn delete(&self, _id: uuid::Uuid) -> Result<bool, RepoError> {
            self.answer().await
        }
    }

    impl BlogRepository for BrokenBlogRepository {}

    macro_rules! app {
        (state = $state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .configure(crate::handlers::configure_routes),
            )
            .await
        };
        ($blogs:expr) => {
            app!(state = state($blogs))
        };
    }

    #[actix_rt::test]
    async fn blogs_are_returned_as_json() {
        let app = app!(seed());

        let res = test::call_service(&app, test::TestRequest::get().uri("/api/blogs").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);

        let content_type = res.headers().get("content-type").unwrap().to_str().unwrap();
        assert!(content_type.starts_with("application/json"));

        let body: Vec<Blog> = test::read_body_json(res).await;
        assert_eq!(body.len(), 3);
        assert!(body.iter().any(|b| b.title == "Go To Statement Considered Harmful"));
    }

    #[actix_rt::test]
    async fn get_succeeds_with_a_valid_id() {
        let blogs = seed();
        let wanted = blogs[0].clone();
        let app = app!(blogs);

        let req = test::TestRequest::get()
            .uri(&format!("/api/blogs/{}", wanted.id))
            .to_request();
        let found: Blog = test::call_and_read_body_json(&app, req).await;

        assert_eq!(found, wanted);
    }

    #[actix_rt::test]
    async fn get_of_missing_blog_is_404() {
        let app = app!(seed());

        let req = test::TestRequest::get()
            .uri(&format!("/api/blogs/{}", uuid::Uuid::new_v4()))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["status"], 404);
        assert!(body.get("id").is_none());
    }

    #[actix_rt::test]
    async fn get_with_malformed_id_is_400() {
        let app = app!(seed());

        let req = test::TestRequest::get()
            .uri("/api/blogs/5a3d5da59070081a82a3445")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["status"], 400);
    }

    #[actix_rt::test]
    async fn post_without_likes_defaults_to_zero_and_grows_the_list() {
        let app = app!(seed());

        let req = test::TestRequest::post()
            .uri("/api/blogs")
            .set_json(json!({ "title": "T", "author": "A", "url": "u" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let created: Blog = test::read_body_json(res).await;
        assert_eq!(created.likes, 0);

        let req = test::TestRequest::get().uri("/api/blogs").to_request();
        let all: Vec<Blog> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.len(), 4);
    }

    #[actix_rt::test]
    async fn post_then_get_round_trips() {
        let app = app!(Vec::new());

        let req = test::TestRequest::post()
            .uri("/api/blogs")
            .set_json(json!({
                "title": "First class tests",
                "author": "Robert C. Martin",
                "url": "http://blog.cleancoder.com/uncle-bob/2017/05/05/TestDefinitions.htmll",
                "likes": 10
            }))
            .to_request();
        let created: Blog = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/blogs/{}", created.id))
            .to_request();
        let fetched: Blog = test::call_and_read_body_json(&app, req).await;

        assert_eq!(fetched.title, "First class tests");
        assert_eq!(fetched.author.as_deref(), Some("Robert C. Martin"));
        assert_eq!(fetched.likes, 10);
        assert_eq!(fetched, created);
    }

    #[actix_rt::test]
    async fn post_without_title_or_url_is_400() {
        let app = app!(seed());

        for body in [
            json!({ "author": "an author", "url": "u", "likes": 1000 }),
            json!({ "title": "a title", "author": "an author", "likes": 1000 }),
        ] {
            let req = test::TestRequest::post().uri("/api/blogs").set_json(body).to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        }

        let req = test::TestRequest::get().uri("/api/blogs").to_request();
        let all: Vec<Blog> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.len(), 3);
    }

    #[actix_rt::test]
    async fn post_with_broken_json_is_400() {
        let app = app!(Vec::new());

        let req = test::TestRequest::post()
            .uri("/api/blogs")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"title\": ")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["title"], "Bad Request");
    }

    #[actix_rt::test]
    async fn delete_then_get_is_404() {
        let blogs = seed();
        let doomed = blogs[0].id;
        let app = app!(blogs);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/blogs/{doomed}"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri(&format!("/api/blogs/{doomed}"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/api/blogs").to_request();
        let all: Vec<Blog> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|b| b.id != doomed));
    }

    #[actix_rt::test]
    async fn delete_of_missing_blog_is_still_204() {
        let app = app!(seed());

        let req = test::TestRequest::delete()
            .uri(&format!("/api/blogs/{}", uuid::Uuid::new_v4()))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[actix_rt::test]
    async fn delete_with_malformed_id_is_400() {
        let app = app!(seed());

        let req = test::TestRequest::delete().uri("/api/blogs/not-an-id").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    async fn put_replaces_every_field() {
        let blogs = seed();
        let target = blogs[0].clone();
        let app = app!(blogs);

        // Clients send the whole record back, id included.
        let req = test::TestRequest::put()
            .uri(&format!("/api/blogs/{}", target.id))
            .set_json(json!({
                "id": target.id,
                "title": "React patterns, revisited",
                "url": target.url,
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let updated: Blog = test::read_body_json(res).await;
        assert_eq!(updated.id, target.id);
        assert_eq!(updated.title, "React patterns, revisited");
        assert_eq!(updated.author, None);
        assert_eq!(updated.likes, 0);

        let req = test::TestRequest::get().uri("/api/blogs").to_request();
        let all: Vec<Blog> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all[0], updated);
    }

    #[actix_rt::test]
    async fn put_of_missing_blog_is_404() {
        let app = app!(seed());

        let req = test::TestRequest::put()
            .uri(&format!("/api/blogs/{}", uuid::Uuid::new_v4()))
            .set_json(json!({ "title": "T", "url": "u", "likes": 1 }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn put_without_url_is_400() {
        let blogs = seed();
        let id = blogs[0].id;
        let app = app!(blogs);

        let req = test::TestRequest::put()
            .uri(&format!("/api/blogs/{id}"))
            .set_json(json!({ "title": "T" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    async fn stats_aggregate_the_stored_blogs() {
        let app = app!(seed());

        let req = test::TestRequest::get().uri("/api/blogs/stats").to_request();
        let stats: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(stats["total_likes"], 24);
        assert_eq!(stats["favorite_blog"]["title"], "Canonical string reduction");
        assert_eq!(stats["most_blogs"], json!({ "author": "Edsger W. Dijkstra", "blogs": 2 }));
        assert_eq!(stats["most_likes"], json!({ "author": "Edsger W. Dijkstra", "likes": 17 }));
    }

    #[actix_rt::test]
    async fn stats_of_empty_list() {
        let app = app!(Vec::new());

        let req = test::TestRequest::get().uri("/api/blogs/stats").to_request();
        let stats: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(stats["total_likes"], 0);
        assert!(stats["favorite_blog"].is_null());
        assert!(stats["most_blogs"].is_null());
    }

    #[actix_rt::test]
    async fn unknown_endpoint_is_404() {
        let app = app!(Vec::new());

        let req = test::TestRequest::get().uri("/api/nothing-here").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["detail"], "unknown endpoint");
    }

    #[actix_rt::test]
    async fn store_failures_answer_500() {
        let app = app!(state = AppState::with_repository(
            Arc::new(BrokenBlogRepository { stall: false }),
            Duration::from_secs(5),
        ));

        for uri in ["/api/blogs", "/api/blogs/stats"] {
            let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri}");

            let body: Value = test::read_body_json(res).await;
            assert_eq!(body["status"], 500);
            assert!(body.get("detail").is_none());
        }

        let req = test::TestRequest::post()
            .uri("/api/blogs")
            .set_json(json!({ "title": "T", "url": "u" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_rt::test]
    async fn stalled_store_answers_504() {
        let app = app!(state = AppState::with_repository(
            Arc::new(BrokenBlogRepository { stall: true }),
            Duration::from_millis(20),
        ));

        let req = test::TestRequest::get()
            .uri(&format!("/api/blogs/{}", uuid::Uuid::new_v4()))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::GATEWAY_TIMEOUT);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["status"], 504);
    }
}
