use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use title_recommender::{
    error::{AppError, AppResult},
    routes::{create_router, AppState},
    services::{catalog, posters::PLACEHOLDER_POSTER_URL, PosterProvider, RecommenderService, TfidfVectorizer},
};

const MOVIES: &str = "\
title,genres,description
A,Action,hero fights
B,Action,hero fights villain
Space Pirates,\"Sci-Fi, Adventure\",pirates raid a space station
";

const SHOWS: &str = "\
title,genres,description
C,Comedy,funny clown
Galaxy Raiders,\"Sci-Fi, Adventure\",pirates roam the space lanes
";

struct StubPosters;

#[async_trait::async_trait]
impl PosterProvider for StubPosters {
    async fn poster_url(&self, title: &str) -> AppResult<Option<String>> {
        match title {
            "B" => Ok(Some("https://img.example/b.jpg".to_string())),
            "C" => Err(AppError::ExternalApi("upstream down".to_string())),
            _ => Ok(None),
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn create_state() -> AppState {
    let catalog = catalog::load(MOVIES.as_bytes(), SHOWS.as_bytes()).unwrap();
    let recommender = RecommenderService::new(catalog, &TfidfVectorizer::new()).unwrap();
    AppState::new(Arc::new(recommender)).with_top_n_limits(3, 10)
}

fn create_test_server() -> TestServer {
    TestServer::new(create_router(create_state())).unwrap()
}

fn titles(body: &Value) -> Vec<String> {
    body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let server = create_test_server();
    let response = server.get("/health").await;
    assert!(response.headers().contains_key("x-request-id"));

    let id = "5f0c6f0e-8d55-4a43-9a4e-2b1a4a8f3c11";
    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static(id),
        )
        .await;
    assert_eq!(response.headers()["x-request-id"], id);
}

#[tokio::test]
async fn test_list_titles_sorted() {
    let server = create_test_server();
    let response = server.get("/api/v1/titles").await;
    response.assert_status_ok();
    let titles: Vec<String> = response.json();
    assert_eq!(titles, vec!["A", "B", "C", "Galaxy Raiders", "Space Pirates"]);
}

#[tokio::test]
async fn test_search_titles() {
    let server = create_test_server();
    let response = server.get("/api/v1/titles/search").add_query_param("q", "pIrA").await;
    response.assert_status_ok();
    let titles: Vec<String> = response.json();
    assert_eq!(titles, vec!["Space Pirates"]);
}

#[tokio::test]
async fn test_search_titles_rejects_empty_query() {
    let server = create_test_server();
    let response = server.get("/api/v1/titles/search").add_query_param("q", "  ").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommend_orders_by_similarity() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "A", "top_n": 2 }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["query"], "A");
    assert_eq!(titles(&body)[0], "B");
    assert_eq!(body["recommendations"][0]["media_type"], "Movie");
    assert!(body["recommendations"][0].get("poster_url").is_none());
}

#[tokio::test]
async fn test_recommend_cross_media_type() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "Space Pirates", "top_n": 1 }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(titles(&body), vec!["Galaxy Raiders"]);
    assert_eq!(body["recommendations"][0]["media_type"], "TV Show");
    let score = body["recommendations"][0]["similarity_score"].as_f64().unwrap();
    assert!(score > 0.0 && score <= 1.0);
}

#[tokio::test]
async fn test_recommend_uses_default_and_max_top_n() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "A" }))
        .await;
    let body: Value = response.json();
    assert_eq!(titles(&body).len(), 3);

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "A", "top_n": 1000 }))
        .await;
    let body: Value = response.json();
    assert_eq!(titles(&body).len(), 4);
}

#[tokio::test]
async fn test_recommend_non_positive_top_n_is_empty() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "A", "top_n": -1 }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert!(titles(&body).is_empty());
}

#[tokio::test]
async fn test_unknown_title_is_404_and_service_keeps_working() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "Nope", "top_n": 2 }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Nope"));

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "C", "top_n": 2 }))
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_posters_fall_back_to_placeholder() {
    let state = create_state().with_posters(Arc::new(StubPosters));
    let server = TestServer::new(create_router(state)).unwrap();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "A", "top_n": 2, "include_posters": true }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs[0]["title"], "B");
    assert_eq!(recs[0]["poster_url"], "https://img.example/b.jpg");
    assert_eq!(recs[1]["poster_url"], PLACEHOLDER_POSTER_URL);
}

#[tokio::test]
async fn test_posters_requested_without_provider() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "B", "top_n": 1, "include_posters": true }))
        .await;
    let body: Value = response.json();
    assert_eq!(body["recommendations"][0]["poster_url"], PLACEHOLDER_POSTER_URL);
}
