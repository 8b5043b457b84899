mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::Value;
use std::sync::Arc;

use blog_service::clients::GeneratedDraft;
use common::{app_state, FakeDrafts};

macro_rules! init_app {
    ($drafts:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(Arc::new($drafts))))
                .configure(blog_service::configure),
        )
        .await
    };
}

fn ids(page: &Value) -> Vec<i64> {
    page["posts"]
        .as_array()
        .expect("posts array")
        .iter()
        .map(|p| p["id"].as_i64().expect("id"))
        .collect()
}

#[actix_web::test]
async fn health_reports_loaded_content() {
    let app = init_app!(FakeDrafts::Disabled);
    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["contentLoaded"], true);
}

#[actix_web::test]
async fn list_hides_drafts_from_visitors() {
    let app = init_app!(FakeDrafts::Disabled);

    let req = test::TestRequest::get().uri("/api/v1/posts").to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&page), vec![3, 2]);
    assert_eq!(page["totalCount"], 3);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["page"], 1);

    let req = test::TestRequest::get()
        .uri("/api/v1/posts?admin=true")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&page), vec![4, 3]);
    assert_eq!(page["totalCount"], 4);
}

#[actix_web::test]
async fn list_searches_tags_and_pages() {
    let app = init_app!(FakeDrafts::Disabled);

    let req = test::TestRequest::get()
        .uri("/api/v1/posts?page=2")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&page), vec![1]);

    // Out-of-range pages leave the view on page 1.
    let req = test::TestRequest::get()
        .uri("/api/v1/posts?page=9")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["page"], 1);

    let req = test::TestRequest::get()
        .uri("/api/v1/posts?q=%20TOKIO%20")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&page), vec![3]);
    assert_eq!(page["query"], "TOKIO");

    let req = test::TestRequest::get()
        .uri("/api/v1/posts?tag=Rust")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&page), vec![3]);
}

#[actix_web::test]
async fn post_detail_respects_visibility() {
    let app = init_app!(FakeDrafts::Disabled);

    let req = test::TestRequest::get().uri("/api/v1/posts/3").to_request();
    let detail: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(detail["post"]["title"], "Async Rust in practice");
    assert_eq!(detail["toc"][0]["id"], "getting-started-0");
    assert_eq!(detail["toc"][1]["text"], "Going Further");

    for uri in [
        "/api/v1/posts/4",
        "/api/v1/posts/4?admin=TRUE",
        "/api/v1/posts/4?admin=false&admin=true",
        "/api/v1/posts/abc",
        "/api/v1/posts/0",
        "/api/v1/posts/99",
    ] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/posts/4?admin=true")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn writes_require_admin_mode() {
    let app = init_app!(FakeDrafts::Disabled);
    let draft = serde_json::json!({"title": "New", "summary": "Post"});

    let req = test::TestRequest::post()
        .uri("/api/v1/posts")
        .set_json(&draft)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri("/api/v1/posts/3?confirm=true")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn create_update_delete_post() {
    let app = init_app!(FakeDrafts::Disabled);

    let req = test::TestRequest::post()
        .uri("/api/v1/posts?admin=true")
        .set_json(serde_json::json!({"title": "New", "summary": "Post", "content": "body"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["id"], 5);
    assert_eq!(created["published"], false);
    assert_eq!(created["tags"][0], "新文章");

    let req = test::TestRequest::post()
        .uri("/api/v1/posts?admin=true")
        .set_json(serde_json::json!({"title": " ", "summary": "Post"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::put()
        .uri("/api/v1/posts/5?admin=true")
        .set_json(serde_json::json!({"published": true}))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["published"], true);
    assert_eq!(updated["title"], "New");

    let req = test::TestRequest::delete()
        .uri("/api/v1/posts/5?admin=true")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["deleted"], false);

    let req = test::TestRequest::delete()
        .uri("/api/v1/posts/5?admin=true&confirm=true")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["deleted"], true);

    let req = test::TestRequest::delete()
        .uri("/api/v1/posts/5?admin=true&confirm=true")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn update_rejects_blank_title_or_summary() {
    let app = init_app!(FakeDrafts::Disabled);

    for patch in [
        serde_json::json!({"title": "   ", "summary": ""}),
        serde_json::json!({"summary": "\t"}),
    ] {
        let req = test::TestRequest::put()
            .uri("/api/v1/posts/3?admin=true")
            .set_json(&patch)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    let req = test::TestRequest::get().uri("/api/v1/posts/3").to_request();
    let detail: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(detail["post"]["title"], "Async Rust in practice");
    assert_ne!(detail["post"]["summary"], "");
}

#[actix_web::test]
async fn like_returns_canonical_post() {
    let app = init_app!(FakeDrafts::Disabled);

    let req = test::TestRequest::post().uri("/blog/like/3").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["post"]["id"], 3);
    assert_eq!(body["post"]["likes"], 11);

    let req = test::TestRequest::post().uri("/blog/like/4").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post().uri("/blog/like/99").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn archive_groups_by_year_and_month() {
    let app = init_app!(FakeDrafts::Disabled);

    let req = test::TestRequest::get().uri("/api/v1/archive").to_request();
    let archive: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(archive["totalCount"], 3);
    assert_eq!(archive["years"][0]["year"], "2025");
    assert_eq!(archive["years"][0]["months"][0]["month"], "2025-10");
    assert_eq!(archive["years"][0]["months"][0]["label"], "2025年10月");
    assert_eq!(archive["years"][1]["year"], "2024");
    assert_eq!(
        archive["months"],
        serde_json::json!(["2025-10", "2025-09", "2024-12"])
    );

    let req = test::TestRequest::get()
        .uri("/api/v1/archive?tag=%E7%94%9F%E6%B4%BB")
        .to_request();
    let archive: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(archive["totalCount"], 1);
    assert_eq!(archive["selectedTag"], "生活");

    let req = test::TestRequest::get().uri("/api/v1/tags").to_request();
    let tags: Vec<String> = test::call_and_read_body_json(&app, req).await;
    assert!(tags.contains(&"Async".to_string()));
    assert_eq!(tags.len(), 4);
}

#[actix_web::test]
async fn reference_pages_and_stats() {
    let app = init_app!(FakeDrafts::Disabled);

    let req = test::TestRequest::get().uri("/api/v1/friends").to_request();
    let friends: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(friends[0]["name"], "Alice");

    let req = test::TestRequest::get().uri("/api/v1/about").to_request();
    let about: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(about["name"], "TMOS");

    let req = test::TestRequest::get().uri("/api/v1/quotes").to_request();
    let quotes: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(quotes[0]["author"], "海子");

    let req = test::TestRequest::get().uri("/api/v1/stats").to_request();
    let stats: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stats["totalVisits"], 12345);
    assert_eq!(stats["postCount"], 3);

    let req = test::TestRequest::get().uri("/api/v1/home").to_request();
    let home: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(home["config"]["heroTitle"], "Hi");
    assert_eq!(home["featuredPosts"].as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn gallery_crud() {
    let app = init_app!(FakeDrafts::Disabled);

    let req = test::TestRequest::post()
        .uri("/api/v1/gallery?admin=true")
        .set_json(serde_json::json!({"title": "harbor", "description": "boats"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let image: Value = test::read_body_json(resp).await;
    assert_eq!(image["id"], 3);
    assert_eq!(image["thumbSrc"], "https://picsum.photos/seed/gallery3/400/400");

    let req = test::TestRequest::put()
        .uri("/api/v1/gallery/3?admin=true")
        .set_json(serde_json::json!({"description": "fishing boats"}))
        .to_request();
    let image: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(image["description"], "fishing boats");

    let req = test::TestRequest::put()
        .uri("/api/v1/gallery/3?admin=true")
        .set_json(serde_json::json!({"title": ""}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::delete()
        .uri("/api/v1/gallery/3?admin=true&confirm=true")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["deleted"], true);

    let req = test::TestRequest::get().uri("/api/v1/gallery").to_request();
    let images: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(images.as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn drafts_map_generator_outcomes() {
    let app = init_app!(FakeDrafts::Disabled);
    let req = test::TestRequest::post()
        .uri("/api/v1/drafts")
        .set_json(serde_json::json!({"topic": "rust"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let app = init_app!(FakeDrafts::Failing);
    let req = test::TestRequest::post()
        .uri("/api/v1/drafts")
        .set_json(serde_json::json!({"topic": "rust"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let app = init_app!(FakeDrafts::Returns(GeneratedDraft {
        title: "Fearless Rust".into(),
        summary: "Two sentences. Really.".into(),
    }));
    let req = test::TestRequest::post()
        .uri("/api/v1/drafts")
        .set_json(serde_json::json!({"topic": "  "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::post()
        .uri("/api/v1/drafts")
        .set_json(serde_json::json!({"topic": "rust"}))
        .to_request();
    let draft: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(draft["title"], "Fearless Rust");
}

#[actix_web::test]
async fn metrics_endpoint_renders_text() {
    let app = init_app!(FakeDrafts::Disabled);
    let req = test::TestRequest::post().uri("/blog/like/3").to_request();
    let _ = test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
