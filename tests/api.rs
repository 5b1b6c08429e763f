//! HTTP API integration tests
//!
//! Runs the full router against the in-process store, exercising the
//! endpoint surface end to end: routing, query parsing, error envelopes
//! and the JSON shapes the client consumes.

use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use hannune::api::{build_router, AppState};
use hannune::datastore::MemoryStore;
use hannune::models::{Article, Category, Issue};
use hannune::services::curation::CurationService;
use hannune::services::feed::{FeedQuery, FeedService, FeedView};

fn issue(id: &str, category: Category, minute: u32) -> Issue {
    Issue {
        id: id.to_string(),
        title: format!("issue {id}"),
        category: Some(category),
        article_count: 0,
        progressive_count: 0,
        centrist_count: 0,
        conservative_count: 0,
        progressive_title: String::new(),
        progressive_body: String::new(),
        centrist_title: String::new(),
        centrist_body: format!("{id} 요약"),
        conservative_title: String::new(),
        conservative_body: String::new(),
        article_ids: String::new(),
        date: None,
        created_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, minute, 0).unwrap(),
        image_url: None,
    }
}

fn article(id: &str, ideology: Option<i32>) -> Article {
    Article {
        id: id.to_string(),
        title: format!("article {id}"),
        body: String::new(),
        url: None,
        press: "언론사".to_string(),
        ideology,
        category: None,
        created_at: Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
    }
}

async fn server_with(store: Arc<MemoryStore>) -> TestServer {
    let feed_service = Arc::new(FeedService::new(
        store.clone(),
        10,
        Duration::from_secs(60),
    ));
    let curation_service = Arc::new(CurationService::new(store));
    let default_view = Arc::new(FeedView::new(
        feed_service.clone(),
        FeedQuery::general(None),
    ));
    let state = AppState {
        feed_service,
        curation_service,
        default_view,
    };
    TestServer::new(build_router(state, "http://localhost:3000")).unwrap()
}

#[tokio::test]
async fn feed_returns_paged_cards() {
    let store = Arc::new(MemoryStore::new());
    for i in 0..12 {
        store.push_issue(issue(&format!("i{i:02}"), Category::Politics, i));
    }
    let server = server_with(store).await;

    let response = server.get("/api/v1/feed").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["cards"].as_array().unwrap().len(), 10);
    assert_eq!(body["total_items"], 12);
    assert_eq!(body["total_pages"], 2);
    assert_eq!(body["cards"][0]["id"], "i11");

    let page2 = server.get("/api/v1/feed").add_query_param("page", "2").await;
    assert_eq!(page2.json::<Value>()["cards"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn feed_filters_by_category() {
    let store = Arc::new(MemoryStore::new());
    store.push_issue(issue("p", Category::Politics, 0));
    store.push_issue(issue("e", Category::Economy, 1));
    let server = server_with(store).await;

    let response = server
        .get("/api/v1/feed")
        .add_query_param("category", "경제")
        .await;
    let body: Value = response.json();
    assert_eq!(body["cards"].as_array().unwrap().len(), 1);
    assert_eq!(body["cards"][0]["id"], "e");
}

#[tokio::test]
async fn unknown_category_is_a_validation_error() {
    let server = server_with(Arc::new(MemoryStore::new())).await;
    let response = server
        .get("/api/v1/feed")
        .add_query_param("category", "환경")
        .await;
    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn bias_feed_defaults_to_politics() {
    let store = Arc::new(MemoryStore::new());
    let mut one_sided = issue("pol", Category::Politics, 0);
    one_sided.article_count = 10;
    one_sided.conservative_count = 8;
    one_sided.progressive_count = 2;
    let mut economy = issue("eco", Category::Economy, 1);
    economy.article_count = 10;
    economy.conservative_count = 8;
    economy.progressive_count = 2;
    store.push_issue(one_sided);
    store.push_issue(economy);
    let server = server_with(store).await;

    let body: Value = server.get("/api/v1/feed/bias").await.json();
    let cards = body["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["id"], "pol");
}

#[tokio::test]
async fn issue_detail_returns_summaries_articles_and_stats() {
    let store = Arc::new(MemoryStore::new());
    let mut it = issue("story", Category::Politics, 0);
    it.article_ids = r#"["b","a"]"#.to_string();
    store.push_issue(it);
    store.push_article(article("a", Some(8)));
    store.push_article(article("b", Some(2)));
    let server = server_with(store).await;

    let response = server.get("/api/v1/issues/story").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["issue"]["id"], "story");
    let articles = body["articles"].as_array().unwrap();
    assert_eq!(articles[0]["id"], "b");
    assert_eq!(articles[1]["id"], "a");
    assert_eq!(body["stats"]["total"], 2);
    assert_eq!(body["stats"]["progressive_percent"], 50);
}

#[tokio::test]
async fn missing_issue_is_404() {
    let server = server_with(Arc::new(MemoryStore::new())).await;
    let response = server.get("/api/v1/issues/absent").await;
    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn curation_insert_round_trip() {
    let store = Arc::new(MemoryStore::new());
    let server = server_with(store.clone()).await;

    let response = server
        .post("/api/v1/articles")
        .json(&json!({
            "outlet_id": "o1",
            "title": "제목",
            "description": "본문",
            "category": "정치",
            "ideology": 3
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let id = response.json::<Value>()["id"].as_str().unwrap().to_string();
    assert_eq!(store.inserted_articles()[0].id, id);
}

#[tokio::test]
async fn curation_rejects_out_of_scale_ideology() {
    let server = server_with(Arc::new(MemoryStore::new())).await;
    let response = server
        .post("/api/v1/articles")
        .json(&json!({
            "outlet_id": "o1",
            "title": "제목",
            "description": "본문",
            "category": "정치",
            "ideology": 0
        }))
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn live_feed_is_idle_until_refreshed() {
    let store = Arc::new(MemoryStore::new());
    store.push_issue(issue("a", Category::Politics, 0));
    let feed_service = Arc::new(FeedService::new(
        store.clone(),
        10,
        Duration::from_secs(60),
    ));
    let default_view = Arc::new(FeedView::new(
        feed_service.clone(),
        FeedQuery::general(None),
    ));
    let state = AppState {
        feed_service,
        curation_service: Arc::new(CurationService::new(store)),
        default_view: default_view.clone(),
    };
    let server = TestServer::new(build_router(state, "http://localhost:3000")).unwrap();

    assert_eq!(server.get("/api/v1/feed/live").await.json::<Value>()["status"], "idle");
    default_view.refresh().await;
    let body: Value = server.get("/api/v1/feed/live").await.json();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["page"]["cards"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn store_outage_maps_to_bad_gateway() {
    let store = Arc::new(MemoryStore::new());
    store.fail_issue_fetches(true);
    let server = server_with(store).await;

    let response = server.get("/api/v1/feed").await;
    response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>()["error"]["code"], "UPSTREAM_ERROR");
}
