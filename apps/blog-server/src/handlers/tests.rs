//! HTTP-level behaviour against the in-memory store and mail outbox.

use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};

use blog_core::domain::{Post, PostStatus, User};
use blog_core::forms::NewPost;
use blog_core::ports::{BaseRepository, UserRepository};
use blog_core::{BlogService, BlogSettings};
use blog_infra::{InMemoryBlogStore, InMemoryMailSender};

use super::configure_routes;
use crate::state::AppState;

struct Harness {
    state: AppState,
    mailer: Arc<InMemoryMailSender>,
    author: User,
}

async fn harness() -> Harness {
    let store = Arc::new(InMemoryBlogStore::new());
    let mailer = Arc::new(InMemoryMailSender::new());
    let blog = BlogService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        mailer.clone(),
        BlogSettings::default(),
    );

    let users: Arc<dyn UserRepository> = store;
    let author = users
        .save(User::new("writer".to_string(), "writer@example.com".to_string()))
        .await
        .unwrap();

    Harness {
        state: AppState::from_service(blog),
        mailer,
        author,
    }
}

impl Harness {
    async fn post(&self, title: &str, status: PostStatus, day: u32, tags: &[&str]) -> Post {
        let new_post = NewPost {
            title: title.to_string(),
            body: "Lorem ipsum".to_string(),
            status: Some(status),
            publish: Some(Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap()),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        };
        self.state
            .blog
            .create_post(self.author.id, &new_post)
            .await
            .unwrap()
    }

    async fn call(&self, req: test::TestRequest) -> ServiceResponse {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(self.state.clone()))
                .configure(configure_routes),
        )
        .await;
        test::call_service(&app, req.to_request()).await
    }

    async fn get(&self, uri: &str) -> ServiceResponse {
        self.call(test::TestRequest::get().uri(uri)).await
    }

    async fn post_json(&self, uri: &str, body: Value) -> ServiceResponse {
        self.call(test::TestRequest::post().uri(uri).set_json(body)).await
    }
}

fn comment_body(name: &str) -> Value {
    json!({ "name": name, "email": "a@x.com", "body": "hi" })
}

#[actix_web::test]
async fn test_health_check() {
    let h = harness().await;
    let resp = h.get("/api/health").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_list_shows_published_posts_with_page_meta() {
    let h = harness().await;
    h.post("First", PostStatus::Published, 1, &[]).await;
    h.post("Draft", PostStatus::Draft, 2, &[]).await;
    h.post("Second", PostStatus::Published, 3, &[]).await;

    let resp = h.get("/api/posts").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;

    let titles: Vec<&str> = body["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Second", "First"]);
    assert_eq!(body["page"]["number"], 1);
    assert_eq!(body["page"]["num_pages"], 1);
    assert_eq!(body["page"]["has_next"], false);
    assert_eq!(body["posts"][0]["url"], "/api/posts/2024/5/3/second");
}

#[actix_web::test]
async fn test_list_pagination_edges() {
    let h = harness().await;
    for day in 1..=10 {
        h.post(&format!("Post {day}"), PostStatus::Published, day, &[]).await;
    }

    let body: Value = test::read_body_json(h.get("/api/posts?page=3").await).await;
    assert_eq!(body["posts"].as_array().unwrap().len(), 2);
    assert_eq!(body["page"]["previous_page_number"], 2);

    let body: Value = test::read_body_json(h.get("/api/posts?page=abc").await).await;
    assert_eq!(body["page"]["number"], 1);
    assert_eq!(body["posts"].as_array().unwrap().len(), 4);

    let resp = h.get("/api/posts?page=99").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 404);

    let resp = h.get("/api/posts?page=99999999999999999999").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_tag_listing() {
    let h = harness().await;
    h.post("Tagged", PostStatus::Published, 1, &["Rust"]).await;
    h.post("Untagged", PostStatus::Published, 2, &[]).await;

    let body: Value = test::read_body_json(h.get("/api/posts/tag/rust").await).await;
    assert_eq!(body["tag"]["name"], "Rust");
    assert_eq!(body["posts"].as_array().unwrap().len(), 1);
    assert_eq!(body["posts"][0]["title"], "Tagged");

    let resp = h.get("/api/posts/tag/nope").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_detail_by_date_and_slug() {
    let h = harness().await;
    h.post("Deep Dive", PostStatus::Published, 7, &[]).await;
    h.post("Unreleased", PostStatus::Draft, 7, &[]).await;

    let resp = h.get("/api/posts/2024/5/7/deep-dive").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["post"]["title"], "Deep Dive");
    assert_eq!(body["comments"], json!([]));

    // Zero-padded segments name the same day.
    assert_eq!(h.get("/api/posts/2024/05/07/deep-dive").await.status(), StatusCode::OK);

    for uri in [
        "/api/posts/2024/5/8/deep-dive",
        "/api/posts/2024/5/7/unreleased",
        "/api/posts/2024/13/7/deep-dive",
        "/api/posts/year/5/7/deep-dive",
    ] {
        assert_eq!(h.get(uri).await.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[actix_web::test]
async fn test_comment_submission() {
    let h = harness().await;
    let post = h.post("Discuss", PostStatus::Published, 9, &[]).await;

    let resp = h
        .post_json(&format!("/api/posts/{}/comment", post.id), comment_body("A"))
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["active"], true);
    assert!(body.get("email").is_none());

    let detail: Value = test::read_body_json(h.get("/api/posts/2024/5/9/discuss").await).await;
    assert_eq!(detail["comments"].as_array().unwrap().len(), 1);
    assert_eq!(detail["comments"][0]["name"], "A");
}

#[actix_web::test]
async fn test_invalid_comment_reports_field_errors() {
    let h = harness().await;
    let post = h.post("Discuss", PostStatus::Published, 9, &[]).await;

    let resp = h
        .post_json(&format!("/api/posts/{}/comment", post.id), comment_body(""))
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"]["name"][0], "This field is required.");

    let detail: Value = test::read_body_json(h.get("/api/posts/2024/5/9/discuss").await).await;
    assert_eq!(detail["comments"], json!([]));
}

#[actix_web::test]
async fn test_comment_on_draft_or_unknown_post_is_not_found() {
    let h = harness().await;
    let draft = h.post("Hidden", PostStatus::Draft, 9, &[]).await;

    let resp = h
        .post_json(&format!("/api/posts/{}/comment", draft.id), comment_body("A"))
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = h
        .post_json("/api/posts/not-a-uuid/comment", comment_body("A"))
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let h = harness().await;
    let post = h.post("Discuss", PostStatus::Published, 9, &[]).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/comment", post.id))
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json");
    let resp = h.call(req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_share_form_then_submit() {
    let h = harness().await;
    let post = h.post("Share Me", PostStatus::Published, 11, &[]).await;
    let uri = format!("/api/posts/{}/share", post.id);

    let resp = h.get(&uri).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["sent"], false);
    assert_eq!(body["form"]["to"], "");
    assert!(h.mailer.sent().await.is_empty());

    let resp = h
        .post_json(
            &uri,
            json!({ "name": "C", "email": "c@x.com", "to": "b@x.com" }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["sent"], true);

    let sent = h.mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, vec!["b@x.com".to_string()]);
    assert!(sent[0].body.contains("http://127.0.0.1:8080/api/posts/2024/5/11/share-me"));
}

#[actix_web::test]
async fn test_share_rejections_send_nothing() {
    let h = harness().await;
    let draft = h.post("Not Yet", PostStatus::Draft, 11, &[]).await;
    let post = h.post("Share Me", PostStatus::Published, 11, &[]).await;

    let resp = h
        .post_json(
            &format!("/api/posts/{}/share", draft.id),
            json!({ "name": "C", "email": "c@x.com", "to": "b@x.com" }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = h
        .post_json(
            &format!("/api/posts/{}/share", post.id),
            json!({ "name": "C", "email": "c@x.com", "to": "not-an-address" }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["errors"]["to"].is_array());

    assert!(h.mailer.sent().await.is_empty());
}

#[actix_web::test]
async fn test_share_requires_sender_address() {
    let h = harness().await;
    let post = h.post("Share Me", PostStatus::Published, 11, &[]).await;

    let resp = h
        .post_json(
            &format!("/api/posts/{}/share", post.id),
            json!({ "name": "C", "to": "b@x.com" }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"]["email"][0], "This field is required.");
    assert!(body["errors"].get("to").is_none());
    assert!(h.mailer.sent().await.is_empty());
}
