//! API tests driving the router directly, no listener

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use jobgraph::http::router;
use jobgraph::service::GraphService;
use jobgraph::source::{
    EdgeRow, GraphSource, JobRow, SourceError, SourceResult, StaticSource,
};

fn job_row(id: u64, title: &str) -> JobRow {
    JobRow {
        id,
        title: title.to_string(),
        industry: "Technology".to_string(),
        sector: "Software".to_string(),
        description: None,
        skills: None,
        responsibilities: None,
    }
}

/// Engineer - Product Manager - Designer chain plus an isolated node
fn app() -> axum::Router {
    let source = StaticSource::new(
        vec![
            job_row(1, "Engineer"),
            job_row(2, "Product Manager"),
            job_row(3, "Designer"),
            job_row(9, "Lighthouse Keeper"),
        ],
        vec![
            EdgeRow { source: 1, target: 2 },
            EdgeRow { source: 2, target: 3 },
        ],
    );
    router(Arc::new(GraphService::new(Box::new(source))))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn all_jobs_and_single_job() {
    let app = app();

    let response = app.clone().oneshot(get("/jobs/all")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 4);

    let response = app.clone().oneshot(get("/jobs/2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "Product Manager");

    let response = app.oneshot(get("/jobs/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn graph_info_reports_counts() {
    let response = app().oneshot(get("/graph/info")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["totalNodes"], 4);
    assert_eq!(body["totalEdges"], 2);
}

#[tokio::test]
async fn calculate_path_round_trip() {
    let response = app()
        .oneshot(post(
            "/level/calculate-path",
            json!({ "startId": 1, "targetId": 3 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["pathLength"], 2);
    let titles: Vec<&str> = body["path"]
        .as_array()
        .unwrap()
        .iter()
        .map(|job| job["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Engineer", "Product Manager", "Designer"]);
}

#[tokio::test]
async fn unknown_ids_are_404_disconnected_is_400() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post(
            "/level/calculate-path",
            json!({ "startId": 1, "targetId": 42 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(post(
            "/level/calculate-path",
            json!({ "startId": 1, "targetId": 9 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("no path"));
}

#[tokio::test]
async fn choices_and_validate_round_trip() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post(
            "/level/choices",
            json!({ "currentNodeId": 1, "targetNodeId": 3 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["correctChoiceId"], 2);
    assert_eq!(body["reachedTarget"], false);
    assert!(body["choices"].as_array().unwrap().len() <= 3);

    let response = app
        .oneshot(post(
            "/level/validate",
            json!({ "currentNodeId": 1, "targetNodeId": 3, "chosenNodeId": 2 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["correct"], true);
    assert_eq!(body["reachedTarget"], false);
    assert_eq!(body["chosenNode"]["title"], "Product Manager");
}

#[tokio::test]
async fn insert_job_returns_created() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post(
            "/jobs",
            json!({
                "title": "Data Scientist",
                "industry": "Technology",
                "sector": "Analytics"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let id = body["id"].as_u64().unwrap();

    let response = app.oneshot(get(&format!("/jobs/{}", id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "Data Scientist");
}

/// Backend that always fails, so the graph can never load
struct DownSource;

#[async_trait]
impl GraphSource for DownSource {
    async fn fetch_jobs(&self, _offset: usize, _limit: usize) -> SourceResult<Vec<JobRow>> {
        Err(SourceError::Backend("connection refused".to_string()))
    }
    async fn fetch_edges(&self, _offset: usize, _limit: usize) -> SourceResult<Vec<EdgeRow>> {
        Err(SourceError::Backend("connection refused".to_string()))
    }
    async fn persist_job(&self, _row: &JobRow) -> SourceResult<()> {
        Err(SourceError::Backend("connection refused".to_string()))
    }
    async fn persist_edges(&self, _rows: &[EdgeRow]) -> SourceResult<()> {
        Err(SourceError::Backend("connection refused".to_string()))
    }
}

#[tokio::test]
async fn unavailable_graph_is_503_not_404() {
    let app = router(Arc::new(GraphService::new(Box::new(DownSource))));

    let response = app
        .clone()
        .oneshot(post(
            "/level/calculate-path",
            json!({ "startId": 1, "targetId": 3 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let response = app.oneshot(get("/status")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["status"], "unavailable");
}

#[tokio::test]
async fn status_reports_healthy_graph() {
    let response = app().oneshot(get("/status")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["graph"]["nodes"], 4);
}
