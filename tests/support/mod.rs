//! Shared fixtures for integration tests

#![allow(dead_code)]

use aboutgen::github::MockRepositoryHost;
use aboutgen::llm::{MockLLMClient, MockResponse};
use aboutgen::DescriptionPipeline;
use serde_json::json;
use std::sync::Arc;

pub const REACT_URL: &str = "https://github.com/facebook/react";

pub fn with_key() -> Option<String> {
    Some("test-key".to_string())
}

pub fn without_key() -> Option<String> {
    None
}

/// Hosting API answers for facebook/react, including manifest and README
pub fn react_host() -> MockRepositoryHost {
    MockRepositoryHost::new()
        .route_json(
            "repos/facebook/react",
            200,
            json!({
                "name": "react",
                "description": "The library for web and native user interfaces.",
                "private": false
            }),
        )
        .route_json(
            "repos/facebook/react/languages",
            200,
            json!({"JavaScript": 5_000_000, "TypeScript": 900_000, "HTML": 40_000, "CSS": 9_000}),
        )
        .route_json(
            "repos/facebook/react/contents",
            200,
            json!([
                {"name": ".github", "type": "dir"},
                {"name": "packages", "type": "dir"},
                {"name": "package.json", "type": "file"},
                {"name": "README.md", "type": "file"}
            ]),
        )
        .route_file(
            "repos/facebook/react/contents/package.json",
            r#"{"private": true, "dependencies": {"rollup": "4", "jest": "29", "prettier": "3"}}"#,
        )
        .route_file(
            "repos/facebook/react/contents/README.md",
            "# React\n\nReact is a JavaScript library for building user interfaces.",
        )
}

pub fn scripted_llm(responses: Vec<MockResponse>) -> Arc<MockLLMClient> {
    let llm = Arc::new(MockLLMClient::new());
    llm.add_responses(responses);
    llm
}

pub fn pipeline(host: Arc<MockRepositoryHost>, llm: Arc<MockLLMClient>) -> DescriptionPipeline {
    DescriptionPipeline::new(host, llm).with_credential_lookup(with_key)
}
