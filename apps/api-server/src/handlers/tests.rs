use std::sync::Arc;
use std::time::Duration;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::{Value, json};
use uuid::Uuid;

use blog_core::domain::Locale;
use blog_core::ports::TokenService;
use blog_infra::{JwtConfig, JwtTokenService};

use super::configure_routes;
use crate::state::AppState;

struct Fixture {
    state: AppState,
    tokens: Arc<dyn TokenService>,
}

impl Fixture {
    fn new() -> Self {
        Self::with_locale(Locale::En)
    }

    fn with_locale(locale: Locale) -> Self {
        let config = JwtConfig {
            secret: "handler-test-secret".to_string(),
            ..JwtConfig::default()
        };
        Self {
            state: AppState::in_memory(locale),
            tokens: Arc::new(JwtTokenService::new(config)),
        }
    }

    fn bearer(&self, user_id: Uuid) -> (header::HeaderName, String) {
        let token = self
            .tokens
            .generate_token(user_id, &format!("{}@example.com", user_id.simple()))
            .unwrap();
        (header::AUTHORIZATION, format!("Bearer {}", token))
    }
}

macro_rules! init_app {
    ($fixture:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($fixture.state.clone()))
                .app_data(web::Data::new($fixture.tokens.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

/// POST a post as `user` and return the created post JSON.
macro_rules! create_post {
    ($app:expr, $fixture:expr, $user:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header($fixture.bearer($user))
            .set_json($body)
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        tokio::time::sleep(Duration::from_millis(2)).await;
        body["post"].clone()
    }};
}

fn tag_names(post: &Value) -> Vec<&str> {
    post["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect()
}

#[actix_web::test]
async fn test_health_is_public() {
    let fixture = Fixture::new();
    let app = init_app!(fixture);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
}

#[actix_web::test]
async fn test_posts_require_a_valid_token() {
    let fixture = Fixture::new();
    let app = init_app!(fixture);

    let missing = test::call_service(&app, test::TestRequest::get().uri("/api/posts").to_request()).await;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(missing).await;
    assert_eq!(body["title"], "Unauthorized");

    let garbage = test::TestRequest::get()
        .uri("/api/posts")
        .insert_header((header::AUTHORIZATION, "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, garbage).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 401);
}

#[actix_web::test]
async fn test_user_endpoint_echoes_identity() {
    let fixture = Fixture::new();
    let app = init_app!(fixture);
    let user = Uuid::new_v4();

    let req = test::TestRequest::get()
        .uri("/api/user")
        .insert_header(fixture.bearer(user))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["id"], user.to_string());
}

#[actix_web::test]
async fn test_create_then_show() {
    let fixture = Fixture::new();
    let app = init_app!(fixture);
    let user = Uuid::new_v4();

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(fixture.bearer(user))
        .set_json(json!({
            "title": "My First Post",
            "content": "This is the content of my first post.",
            "tags": ["Ashot", "NewTag", "Ashot"]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert!(resp.headers().contains_key(header::CONTENT_TYPE));

    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["message"], "Post created successfully");
    assert_eq!(created["post"]["user_id"], user.to_string());
    assert_eq!(tag_names(&created["post"]), vec!["Ashot", "NewTag"]);

    let id = created["post"]["id"].as_str().unwrap();
    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}", id))
        .insert_header(fixture.bearer(Uuid::new_v4()))
        .to_request();
    let shown: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(shown["message"], "Post retrieved successfully");
    assert_eq!(shown["post"], created["post"]);
}

#[actix_web::test]
async fn test_invalid_payloads_are_unprocessable() {
    let fixture = Fixture::new();
    let app = init_app!(fixture);
    let user = Uuid::new_v4();

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(fixture.bearer(user))
        .set_json(json!({ "title": "x".repeat(256), "tags": ["ok", ""] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["errors"]["title"].is_array());
    assert!(body["errors"]["content"].is_array());
    assert!(body["errors"]["tags.1"].is_array());

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(fixture.bearer(user))
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"title\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["errors"]["body"].is_array());

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/posts")
            .insert_header(fixture.bearer(user))
            .to_request(),
    )
    .await;
    assert_eq!(listed["posts"].as_array().unwrap().len(), 0);
}

#[actix_web::test]
async fn test_unknown_and_malformed_ids_are_not_found() {
    let fixture = Fixture::new();
    let app = init_app!(fixture);
    let user = Uuid::new_v4();

    for uri in [format!("/api/posts/{}", Uuid::new_v4()), "/api/posts/abc".to_string()] {
        let req = test::TestRequest::get()
            .uri(&uri)
            .insert_header(fixture.bearer(user))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[actix_web::test]
async fn test_only_the_owner_may_update_or_delete() {
    let fixture = Fixture::new();
    let app = init_app!(fixture);
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();
    let post = create_post!(app, fixture, owner, json!({
        "title": "Original", "content": "Body", "tags": ["x"]
    }));
    let uri = format!("/api/posts/{}", post["id"].as_str().unwrap());

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(fixture.bearer(intruder))
        .set_json(json!({ "title": "Unauthorized Update", "content": "Nope", "tags": ["Ashot"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(fixture.bearer(intruder))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(fixture.bearer(owner))
        .to_request();
    let shown: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(shown["post"], post);
}

#[actix_web::test]
async fn test_update_checks_existence_before_payload() {
    let fixture = Fixture::new();
    let app = init_app!(fixture);
    let owner = Uuid::new_v4();
    let post = create_post!(app, fixture, owner, json!({ "title": "A", "content": "B" }));

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{}", Uuid::new_v4()))
        .insert_header(fixture.bearer(owner))
        .set_json(json!({}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/posts/{}", post["id"].as_str().unwrap()))
        .insert_header(fixture.bearer(owner))
        .set_json(json!({ "title": "" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[actix_web::test]
async fn test_tag_filter_and_clearing() {
    let fixture = Fixture::new();
    let app = init_app!(fixture);
    let owner = Uuid::new_v4();
    let a = create_post!(app, fixture, owner, json!({
        "title": "A", "content": "a", "tags": ["x", "new"]
    }));
    let b = create_post!(app, fixture, owner, json!({
        "title": "B", "content": "b", "tags": ["x"]
    }));

    let list = |tag: &str| {
        test::TestRequest::get()
            .uri(&format!("/api/posts?tag={}", tag))
            .insert_header(fixture.bearer(owner))
            .to_request()
    };

    let by_new: Value = test::call_and_read_body_json(&app, list("new")).await;
    assert_eq!(by_new["message"], "Posts retrieved successfully");
    assert_eq!(by_new["posts"].as_array().unwrap().len(), 1);
    assert_eq!(by_new["posts"][0]["id"], a["id"]);

    let by_y: Value = test::call_and_read_body_json(&app, list("y")).await;
    assert!(by_y["posts"].as_array().unwrap().is_empty());

    let by_x: Value = test::call_and_read_body_json(&app, list("x")).await;
    assert_eq!(by_x["posts"][0]["id"], b["id"]);
    assert_eq!(by_x["posts"][1]["id"], a["id"]);

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{}", a["id"].as_str().unwrap()))
        .insert_header(fixture.bearer(owner))
        .set_json(json!({ "title": "A", "content": "a", "tags": [] }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["message"], "Post updated successfully");
    assert!(tag_names(&updated["post"]).is_empty());

    let req = test::TestRequest::get()
        .uri("/api/tags")
        .insert_header(fixture.bearer(owner))
        .to_request();
    let tags: Value = test::call_and_read_body_json(&app, req).await;
    let names: Vec<&str> = tags
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["new", "x"]);
}

#[actix_web::test]
async fn test_delete_then_gone() {
    let fixture = Fixture::new();
    let app = init_app!(fixture);
    let owner = Uuid::new_v4();
    let post = create_post!(app, fixture, owner, json!({ "title": "A", "content": "B", "tags": ["x"] }));
    let uri = format!("/api/posts/{}", post["id"].as_str().unwrap());

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(fixture.bearer(owner))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "Post deleted successfully" }));

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(fixture.bearer(owner))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_locale_selection() {
    let fixture = Fixture::new();
    let app = init_app!(fixture);
    let user = Uuid::new_v4();

    let message = |uri: &str, accept: Option<&str>| {
        let mut req = test::TestRequest::get()
            .uri(uri)
            .insert_header(fixture.bearer(user));
        if let Some(lang) = accept {
            req = req.insert_header((header::ACCEPT_LANGUAGE, lang.to_string()));
        }
        req.to_request()
    };

    let by_header: Value = test::call_and_read_body_json(&app, message("/api/posts", Some("it"))).await;
    assert_eq!(by_header["message"], "Post recuperati con successo");

    let by_query: Value = test::call_and_read_body_json(&app, message("/api/posts?lang=it", None)).await;
    assert_eq!(by_query["message"], "Post recuperati con successo");

    // an unsupported header is not overridden by the query
    let unsupported: Value =
        test::call_and_read_body_json(&app, message("/api/posts?lang=it", Some("fr"))).await;
    assert_eq!(unsupported["message"], "Posts retrieved successfully");
}

#[actix_web::test]
async fn test_configured_default_locale() {
    let fixture = Fixture::with_locale(Locale::It);
    let app = init_app!(fixture);

    let req = test::TestRequest::get()
        .uri("/api/posts")
        .insert_header(fixture.bearer(Uuid::new_v4()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["message"], "Post recuperati con successo");
}
