use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test};
use chrono::Utc;
use serde_json::{Value, json};
use uuid::Uuid;

use vlog_core::VlogConfig;
use vlog_core::domain::{Category, STAFF_ROLE};
use vlog_core::ports::{PasswordService, TokenService};
use vlog_infra::{Argon2PasswordService, JwtConfig, JwtTokenService, Repositories};

use super::configure_routes;
use crate::state::AppState;

struct Harness {
    state: AppState,
    repos: Repositories,
    tokens: Arc<dyn TokenService>,
    category: Category,
}

async fn harness() -> Harness {
    let repos = Repositories::in_memory();
    let category = repos
        .categories
        .save(Category::new(
            "Python Basics".into(),
            "python-basics".into(),
            None,
        ))
        .await
        .unwrap();

    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
        secret: "handler-test-secret".to_string(),
        ..JwtConfig::default()
    }));
    let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
    let state = AppState::new(&repos, VlogConfig::default(), tokens.clone(), passwords);

    Harness {
        state,
        repos,
        tokens,
        category,
    }
}

macro_rules! init_app {
    ($h:expr) => {{
        let state = $h.state.clone();
        test::init_service(
            App::new()
                .configure(move |cfg| state.register(cfg))
                .configure(configure_routes),
        )
        .await
    }};
}

impl Harness {
    fn bearer(&self, user_id: Uuid, staff: bool) -> (header::HeaderName, String) {
        let mut roles = vec!["user".to_string()];
        if staff {
            roles.push(STAFF_ROLE.to_string());
        }
        let token = self
            .tokens
            .generate_token(user_id, "someone@example.com", roles)
            .unwrap();
        (header::AUTHORIZATION, format!("Bearer {token}"))
    }

    fn post_body(&self, title: &str) -> Value {
        json!({
            "title": title,
            "video_url": "https://www.youtube.com/watch?v=rHux0gMZ3Eg",
            "description": "A walk through the basics",
            "category_id": self.category.id,
            "tags": "python, beginner",
            "published_date": Utc::now(),
        })
    }
}

#[actix_web::test]
async fn test_health() {
    let h = harness().await;
    let app = init_app!(h);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_empty_listing() {
    let h = harness().await;
    let app = init_app!(h);

    let body: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(body["items"], json!([]));
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["has_next"], false);
    assert_eq!(body["categories"][0]["slug"], "python-basics");
}

#[actix_web::test]
async fn test_invalid_page_is_bad_request() {
    let h = harness().await;
    let app = init_app!(h);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/?page=0").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["type"], "about:blank");
}

#[actix_web::test]
async fn test_anonymous_create_is_rejected() {
    let h = harness().await;
    let app = init_app!(h);

    let req = test::TestRequest::post()
        .uri("/vlog/new/")
        .set_json(h.post_body("Sneaky"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let listing = h.state.vlogs.list(&Default::default()).await.unwrap();
    assert_eq!(listing.page.meta.total_items, 0);
}

#[actix_web::test]
async fn test_create_then_view_counts() {
    let h = harness().await;
    let app = init_app!(h);
    let author = Uuid::new_v4();

    let req = test::TestRequest::post()
        .uri("/vlog/new/")
        .insert_header(h.bearer(author, false))
        .set_json(h.post_body("Python Loops"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap().to_string();
    assert!(location.ends_with("/python-loops/"));
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["data"]["author_id"], author.to_string());
    assert_eq!(
        created["data"]["embed_url"],
        "https://www.youtube-nocookie.com/embed/rHux0gMZ3Eg"
    );

    for expected in 1..=2 {
        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri(&location).to_request(),
        )
        .await;
        assert_eq!(body["post"]["views_count"], expected);
        assert_eq!(body["category"]["slug"], "python-basics");
    }
}

#[actix_web::test]
async fn test_route_word_titles_stay_readable() {
    let h = harness().await;
    let app = init_app!(h);
    let author = Uuid::new_v4();

    for (title, slug) in [("Edit", "edit-2"), ("Delete", "delete-2")] {
        let req = test::TestRequest::post()
            .uri("/vlog/new/")
            .insert_header(h.bearer(author, false))
            .set_json(h.post_body(title))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap().to_string();
        assert!(location.ends_with(&format!("/{slug}/")));

        let resp = test::call_service(&app, test::TestRequest::get().uri(&location).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["post"]["title"], title);
        assert_eq!(body["post"]["views_count"], 1);
    }
}

#[actix_web::test]
async fn test_invalid_form_lists_field_errors() {
    let h = harness().await;
    let app = init_app!(h);

    let req = test::TestRequest::post()
        .uri("/vlog/new/")
        .insert_header(h.bearer(Uuid::new_v4(), false))
        .set_json(json!({ "title": "", "video_url": "not a url" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    let errors = body["errors"].as_array().unwrap();
    assert!(errors.iter().any(|e| e.as_str().unwrap().starts_with("title:")));
    assert!(errors.iter().any(|e| e.as_str().unwrap().starts_with("video_url:")));
}

#[actix_web::test]
async fn test_malformed_json_is_problem_details() {
    let h = harness().await;
    let app = init_app!(h);

    let req = test::TestRequest::post()
        .uri("/vlog/new/")
        .insert_header(h.bearer(Uuid::new_v4(), false))
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Bad Request");
}

#[actix_web::test]
async fn test_only_the_author_may_edit_or_delete() {
    let h = harness().await;
    let app = init_app!(h);
    let author = Uuid::new_v4();
    let intruder = Uuid::new_v4();

    let req = test::TestRequest::post()
        .uri("/vlog/new/")
        .insert_header(h.bearer(author, false))
        .set_json(h.post_body("Mine"))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let missing_token = test::TestRequest::get()
        .uri(&format!("/vlog/{id}/edit/"))
        .to_request();
    assert_eq!(
        test::call_service(&app, missing_token).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let hijack = test::TestRequest::post()
        .uri(&format!("/vlog/{id}/edit/"))
        .insert_header(h.bearer(intruder, false))
        .set_json(h.post_body("Hijacked"))
        .to_request();
    assert_eq!(test::call_service(&app, hijack).await.status(), StatusCode::FORBIDDEN);

    let delete = test::TestRequest::post()
        .uri(&format!("/vlog/{id}/delete/"))
        .insert_header(h.bearer(intruder, false))
        .to_request();
    assert_eq!(test::call_service(&app, delete).await.status(), StatusCode::FORBIDDEN);

    let edit = test::TestRequest::post()
        .uri(&format!("/vlog/{id}/edit/"))
        .insert_header(h.bearer(author, false))
        .set_json(h.post_body("Still mine"))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, edit).await;
    assert_eq!(updated["data"]["title"], "Still mine");
    assert_eq!(updated["data"]["slug"], "mine");

    let delete = test::TestRequest::post()
        .uri(&format!("/vlog/{id}/delete/"))
        .insert_header(h.bearer(author, false))
        .to_request();
    assert_eq!(test::call_service(&app, delete).await.status(), StatusCode::NO_CONTENT);

    let gone = test::TestRequest::get()
        .uri(&format!("/vlog/{id}/mine/"))
        .to_request();
    assert_eq!(test::call_service(&app, gone).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_categories_with_counts() {
    let h = harness().await;
    let app = init_app!(h);

    let req = test::TestRequest::post()
        .uri("/vlog/new/")
        .insert_header(h.bearer(Uuid::new_v4(), false))
        .set_json(h.post_body("Counted"))
        .to_request();
    test::call_service(&app, req).await;

    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/categories/").to_request(),
    )
    .await;
    assert_eq!(body[0]["name"], "Python Basics");
    assert_eq!(body[0]["post_count"], 1);
}

#[actix_web::test]
async fn test_admin_is_staff_only() {
    let h = harness().await;
    let app = init_app!(h);

    let req = test::TestRequest::get()
        .uri("/admin/vlogs/")
        .insert_header(h.bearer(Uuid::new_v4(), false))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/admin/vlogs/")
        .insert_header(h.bearer(Uuid::new_v4(), true))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_admin_batch_reset_views() {
    let h = harness().await;
    let app = init_app!(h);
    let staff = Uuid::new_v4();

    let req = test::TestRequest::post()
        .uri("/vlog/new/")
        .insert_header(h.bearer(staff, true))
        .set_json(h.post_body("Popular"))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["data"]["id"].as_i64().unwrap();
    h.state.vlogs.detail(id, "popular").await.unwrap();

    let req = test::TestRequest::post()
        .uri("/admin/vlogs/actions/")
        .insert_header(h.bearer(staff, true))
        .set_json(json!({ "action": "reset_views", "ids": [id] }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["affected"], 1);
    assert_eq!(body["message"], "1 vlog(s) had their view count reset.");

    let post = h.repos.posts.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(post.views_count, 0);

    let req = test::TestRequest::post()
        .uri("/admin/vlogs/actions/")
        .insert_header(h.bearer(staff, true))
        .set_json(json!({ "action": "feature", "ids": [id] }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_admin_category_create_and_delete() {
    let h = harness().await;
    let app = init_app!(h);
    let staff = Uuid::new_v4();

    let req = test::TestRequest::post()
        .uri("/admin/categories/")
        .insert_header(h.bearer(staff, true))
        .set_json(json!({ "name": "Web Development" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["slug"], "web-development");

    let req = test::TestRequest::post()
        .uri("/admin/categories/")
        .insert_header(h.bearer(staff, true))
        .set_json(json!({ "name": "Web Development" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::delete()
        .uri(&format!("/admin/categories/{}/", h.category.id))
        .insert_header(h.bearer(staff, true))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn test_register_login_me() {
    let h = harness().await;
    let app = init_app!(h);

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({
            "username": "creator",
            "email": "creator@example.com",
            "password": "creator-pass-123",
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({
            "username": "creator2",
            "email": "creator@example.com",
            "password": "creator-pass-123",
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": "creator@example.com", "password": "wrong-password" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": "creator@example.com", "password": "creator-pass-123" }))
        .to_request();
    let login: Value = test::call_and_read_body_json(&app, req).await;
    let token = login["access_token"].as_str().unwrap();
    assert_eq!(login["token_type"], "Bearer");

    let req = test::TestRequest::get()
        .uri("/auth/me")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let me: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(me["username"], "creator");
    assert_eq!(me["is_staff"], false);
}
