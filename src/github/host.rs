//! Hosting API transport
//!
//! [`RepositoryHost`] is the seam between the aggregator and the network. The
//! aggregator only ever issues read-only `GET`s against relative API paths, so the
//! trait is a single method. [`GitHubApi`] is the real reqwest-backed
//! implementation; [`MockRepositoryHost`] serves canned responses for tests.

use crate::config;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Transport-level failures talking to the hosting API
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    /// The request never produced an HTTP response
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Raw response from a hosting API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostResponse {
    pub status: u16,
    pub url: String,
    pub body: String,
}

impl HostResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserializes the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Canonical reason phrase for the status code, e.g. "Service Unavailable"
    pub fn reason(&self) -> String {
        reqwest::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown Status")
            .to_string()
    }
}

/// Read-only access to a repository hosting API
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// Issues a `GET` against an API path relative to the host's base URL
    async fn get(&self, path: &str) -> Result<HostResponse, HostError>;

    /// Whether a hosting credential is configured right now
    fn has_credential(&self) -> bool;

    fn name(&self) -> &str;
}

/// GitHub REST API client
///
/// The optional `GITHUB_TOKEN` credential is looked up on every request rather
/// than captured at construction, so rotating it takes effect immediately.
pub struct GitHubApi {
    base_url: String,
    http_client: Client,
}

impl GitHubApi {
    /// Creates a client against `base_url` (normally `https://api.github.com`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, HostError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HostError::Client(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl RepositoryHost for GitHubApi {
    async fn get(&self, path: &str) -> Result<HostResponse, HostError> {
        let url = self.url_for(path);
        debug!(%url, "GitHub API request");

        let mut request = self
            .http_client
            .get(&url)
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, concat!("aboutgen/", env!("CARGO_PKG_VERSION")));

        if let Some(token) = config::hosting_token() {
            request = request.header(AUTHORIZATION, format!("token {}", token));
        }

        let response = request.send().await.map_err(|e| HostError::Transport {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| HostError::Transport {
            url: url.clone(),
            message: e.to_string(),
        })?;

        debug!(%url, status, bytes = body.len(), "GitHub API response");
        Ok(HostResponse { status, url, body })
    }

    fn has_credential(&self) -> bool {
        config::hosting_token().is_some()
    }

    fn name(&self) -> &str {
        "GitHub"
    }
}

impl fmt::Debug for GitHubApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubApi")
            .field("base_url", &self.base_url)
            .finish()
    }
}

enum MockRoute {
    Reply { status: u16, body: String },
    Fail(String),
}

/// In-memory hosting API for tests.
///
/// Unrouted paths answer `404 Not Found`, mirroring the real API. Every call is
/// recorded so tests can assert which requests were (or were not) made.
pub struct MockRepositoryHost {
    routes: Mutex<HashMap<String, MockRoute>>,
    calls: Mutex<Vec<String>>,
    credential: bool,
}

impl MockRepositoryHost {
    pub fn new() -> Self {
        Self {
            routes: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            credential: false,
        }
    }

    /// Pretend a hosting credential is configured
    pub fn with_credential(mut self, credential: bool) -> Self {
        self.credential = credential;
        self
    }

    pub fn route(self, path: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        self.lock_routes().insert(
            path.into(),
            MockRoute::Reply {
                status,
                body: body.into(),
            },
        );
        self
    }

    pub fn route_json(self, path: impl Into<String>, status: u16, body: serde_json::Value) -> Self {
        self.route(path, status, body.to_string())
    }

    /// Routes a file path to a base64 contents payload, the way the API serves files
    pub fn route_file(self, path: impl Into<String>, text: &str) -> Self {
        self.route_json(path, 200, Self::file_payload(text))
    }

    /// Makes a path fail at the transport level
    pub fn route_failure(self, path: impl Into<String>, message: impl Into<String>) -> Self {
        self.lock_routes()
            .insert(path.into(), MockRoute::Fail(message.into()));
        self
    }

    /// Contents-API style payload: base64 wrapped at 60 columns
    pub fn file_payload(text: &str) -> serde_json::Value {
        let encoded = BASE64.encode(text.as_bytes());
        let wrapped = encoded
            .as_bytes()
            .chunks(60)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join("\n");
        serde_json::json!({ "content": wrapped, "encoding": "base64" })
    }

    /// Paths requested so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn lock_routes(&self) -> std::sync::MutexGuard<'_, HashMap<String, MockRoute>> {
        match self.routes.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for MockRepositoryHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RepositoryHost for MockRepositoryHost {
    async fn get(&self, path: &str) -> Result<HostResponse, HostError> {
        let path = path.trim_start_matches('/').to_string();
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(path.clone());
        }

        let url = format!("mock://github/{}", path);
        match self.lock_routes().get(&path) {
            Some(MockRoute::Reply { status, body }) => Ok(HostResponse {
                status: *status,
                url,
                body: body.clone(),
            }),
            Some(MockRoute::Fail(message)) => Err(HostError::Transport {
                url,
                message: message.clone(),
            }),
            None => Ok(HostResponse {
                status: 404,
                url,
                body: r#"{"message":"Not Found"}"#.to_string(),
            }),
        }
    }

    fn has_credential(&self) -> bool {
        self.credential
    }

    fn name(&self) -> &str {
        "MockGitHub"
    }
}

impl fmt::Debug for MockRepositoryHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockRepositoryHost")
            .field("credential", &self.credential)
            .field("calls", &self.calls())
            .finish()
    }
}
