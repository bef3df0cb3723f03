//! HTTP front door tests driven through the router without a socket

mod support;

use aboutgen::github::MockRepositoryHost;
use aboutgen::llm::MockResponse;
use aboutgen::server::router;
use aboutgen::{generate_description, GenerateRequest};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use support::{pipeline, react_host, scripted_llm, REACT_URL};
use tower::ServiceExt;

async fn post_generate(app: axum::Router, body: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/generate")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_generate_success_envelope() {
    let llm = scripted_llm(vec![MockResponse::text("UI library in JavaScript.")]);
    let app = router(Arc::new(pipeline(Arc::new(react_host()), llm)));

    let (status, body) = post_generate(app, &json!({ "url": REACT_URL }).to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "description": "UI library in JavaScript.",
            "metadata": {"name": "react", "languages": ["JavaScript", "TypeScript", "HTML"]}
        })
    );
}

#[tokio::test]
async fn test_missing_url_is_bad_request() {
    let app = router(Arc::new(pipeline(Arc::new(react_host()), scripted_llm(vec![]))));

    let (status, body) = post_generate(app, "{}").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "error": "GitHub URL is required"}));
}

#[tokio::test]
async fn test_invalid_url_is_bad_request() {
    let app = router(Arc::new(pipeline(Arc::new(react_host()), scripted_llm(vec![]))));

    let (status, body) = post_generate(app, r#"{"url": "https://gitlab.com/a/b"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid GitHub repository URL");
}

#[tokio::test]
async fn test_unreadable_body_is_bad_request() {
    let app = router(Arc::new(pipeline(Arc::new(react_host()), scripted_llm(vec![]))));

    let (status, body) = post_generate(app, "url=nope").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_rate_limited_maps_to_429() {
    let llm = scripted_llm(vec![MockResponse::api_failure("429 Too Many Requests")]);
    let app = router(Arc::new(pipeline(Arc::new(react_host()), llm)));

    let (status, body) = post_generate(app, &json!({ "url": REACT_URL }).to_string()).await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert!(body["error"].as_str().unwrap().contains("try again shortly"));
}

#[tokio::test]
async fn test_other_failures_map_to_500() {
    let app = router(Arc::new(pipeline(
        Arc::new(MockRepositoryHost::new().route("repos/facebook/react", 403, "{}")),
        scripted_llm(vec![]),
    )));

    let (status, body) = post_generate(app, &json!({ "url": REACT_URL }).to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_healthz() {
    let app = router(Arc::new(pipeline(Arc::new(react_host()), scripted_llm(vec![]))));

    let response = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_generate_description_with_hints() {
    let llm = scripted_llm(vec![MockResponse::text("Extended text.")]);
    let pipeline = pipeline(Arc::new(react_host()), llm.clone());
    let request = GenerateRequest {
        url: Some(REACT_URL.to_string()),
        features: Some("real-time sync".to_string()),
        benefits: None,
    };

    let response = generate_description(&pipeline, request).await;

    assert!(response.is_success());
    assert!(llm.last_prompt().unwrap().contains("Key Features: real-time sync"));
}
