//! HTTP front door for the description pipeline

use crate::api::{generate_description, GenerateRequest};
use crate::pipeline::DescriptionPipeline;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid bind address '{addr}': {message}")]
    InvalidAddress { addr: String, message: String },

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server error: {0}")]
    Serve(#[source] std::io::Error),
}

pub type AppState = Arc<DescriptionPipeline>;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Builds the router: `POST /api/generate` and `GET /healthz`
pub fn router(pipeline: AppState) -> Router {
    Router::new()
        .route("/api/generate", post(generate))
        .route("/healthz", get(health_check))
        .with_state(pipeline)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

async fn generate(
    State(pipeline): State<AppState>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> (StatusCode, Json<crate::api::GenerateResponse>) {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!(error = %rejection, "Unreadable request body, treating as empty");
            GenerateRequest::default()
        }
    };

    let response = generate_description(&pipeline, request).await;
    let status =
        StatusCode::from_u16(response.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    debug!(success = response.is_success(), status = status.as_u16(), "Generate request handled");
    (status, Json(response))
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Serves `pipeline` on `bind` until the process is stopped
pub async fn serve(pipeline: DescriptionPipeline, bind: &str) -> Result<(), ServerError> {
    let addr: SocketAddr = bind.parse().map_err(|e: std::net::AddrParseError| {
        ServerError::InvalidAddress {
            addr: bind.to_string(),
            message: e.to_string(),
        }
    })?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, router(Arc::new(pipeline)))
        .await
        .map_err(ServerError::Serve)
}
