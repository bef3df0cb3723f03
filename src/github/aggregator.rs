//! Repository metadata aggregation
//!
//! Builds a [`RepositoryData`] from a bounded, ordered set of hosting API calls:
//!
//! 1. repository metadata (critical: every failure aborts)
//! 2. language breakdown
//! 3. top-level directory listing
//! 4. `package.json`, when the listing has one
//! 5. the README, when the listing has one
//!
//! Steps 2-5 are enrichment. Their failures are logged, reported as
//! [`ProgressEvent::EnrichmentSkipped`], and degrade to empty values.
//! Nothing here retries.

use super::host::{HostError, HostResponse, RepositoryHost};
use super::types::{ContentEntry, FilePayload, RepositoryData, RepositoryMetadata};
use super::url::RepositoryIdentifier;
use crate::error::PipelineError;
use crate::progress::{ProgressEvent, ProgressHandler};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// README text kept for prompt context, in characters
pub const README_EXCERPT_LIMIT: usize = 1000;

const MANIFEST_FILE: &str = "package.json";
const README_PREFIX: &str = "readme.md";

/// Fetches and normalizes repository metadata from a [`RepositoryHost`]
pub struct MetadataAggregator {
    host: Arc<dyn RepositoryHost>,
    progress: Option<Arc<dyn ProgressHandler>>,
}

impl MetadataAggregator {
    pub fn new(host: Arc<dyn RepositoryHost>) -> Self {
        Self {
            host,
            progress: None,
        }
    }

    pub fn with_progress(mut self, handler: Arc<dyn ProgressHandler>) -> Self {
        self.progress = Some(handler);
        self
    }

    pub fn host_name(&self) -> &str {
        self.host.name()
    }

    /// Runs the full aggregation sequence for one repository.
    ///
    /// # Errors
    ///
    /// Only the repository lookup can fail the call: `RepoNotFound`,
    /// `RepoPrivate`, `Unauthorized`, `Forbidden`, or `UpstreamError`.
    pub async fn fetch(&self, id: &RepositoryIdentifier) -> Result<RepositoryData, PipelineError> {
        let base = format!("repos/{}/{}", id.owner, id.repo);

        let metadata = self.fetch_metadata(id, &base).await?;
        if metadata.private {
            warn!(repository = %id, "Repository is marked private");
            return Err(PipelineError::RepoPrivate {
                repository: id.slug(),
                explicit: true,
            });
        }

        let languages = self.fetch_languages(&base).await;
        let file_structure = self.fetch_listing(&base).await;

        let package_manifest = if file_structure.iter().any(|name| name == MANIFEST_FILE) {
            self.fetch_manifest(&base).await
        } else {
            None
        };

        let readme_excerpt = match find_readme(&file_structure) {
            Some(readme) => self.fetch_readme(&base, readme).await,
            None => None,
        };

        info!(
            repository = %id,
            languages = languages.len(),
            entries = file_structure.len(),
            manifest = package_manifest.is_some(),
            readme = readme_excerpt.is_some(),
            "Repository metadata aggregated"
        );

        Ok(RepositoryData {
            name: metadata.name,
            description: metadata.description,
            languages,
            file_structure,
            package_manifest,
            readme_excerpt,
        })
    }

    async fn fetch_metadata(
        &self,
        id: &RepositoryIdentifier,
        base: &str,
    ) -> Result<RepositoryMetadata, PipelineError> {
        let response = self.host.get(base).await.map_err(|e| {
            warn!(repository = %id, error = %e, "Repository lookup failed");
            match e {
                HostError::Transport { url, message } => {
                    PipelineError::UpstreamError {
                        status: None,
                        reason: message,
                        url,
                    }
                }
                HostError::Client(message) => PipelineError::UpstreamError {
                    status: None,
                    reason: message,
                    url: base.to_string(),
                },
            }
        })?;

        if !response.is_success() {
            return Err(self.classify_lookup_failure(id, &response));
        }

        response
            .json::<RepositoryMetadata>()
            .map_err(|e| PipelineError::UpstreamError {
                status: Some(response.status),
                reason: format!("invalid repository metadata: {}", e),
                url: response.url.clone(),
            })
    }

    /// Maps a non-success repository lookup onto the error taxonomy.
    ///
    /// A 404 is ambiguous: anonymous callers get it for private repositories too.
    /// Without a credential it is reported as private, with one as not found.
    fn classify_lookup_failure(
        &self,
        id: &RepositoryIdentifier,
        response: &HostResponse,
    ) -> PipelineError {
        warn!(repository = %id, status = response.status, "Repository lookup rejected");
        match response.status {
            404 if self.host.has_credential() => PipelineError::RepoNotFound {
                repository: id.slug(),
            },
            404 => PipelineError::RepoPrivate {
                repository: id.slug(),
                explicit: false,
            },
            401 => PipelineError::Unauthorized,
            403 => PipelineError::Forbidden,
            status => PipelineError::UpstreamError {
                status: Some(status),
                reason: response.reason(),
                url: response.url.clone(),
            },
        }
    }

    async fn fetch_languages(&self, base: &str) -> Vec<String> {
        let path = format!("{}/languages", base);
        self.fetch_enrichment::<Map<String, Value>>("languages", &path)
            .await
            .map(|breakdown| breakdown.keys().cloned().collect())
            .unwrap_or_default()
    }

    async fn fetch_listing(&self, base: &str) -> Vec<String> {
        let path = format!("{}/contents", base);
        self.fetch_enrichment::<Vec<ContentEntry>>("contents", &path)
            .await
            .map(|entries| entries.into_iter().map(|entry| entry.name).collect())
            .unwrap_or_default()
    }

    async fn fetch_manifest(&self, base: &str) -> Option<Map<String, Value>> {
        let text = self.fetch_file_text(base, MANIFEST_FILE).await?;
        match serde_json::from_str::<Map<String, Value>>(&text) {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                self.skip(MANIFEST_FILE, format!("manifest is not a JSON object: {}", e));
                None
            }
        }
    }

    async fn fetch_readme(&self, base: &str, file_name: &str) -> Option<String> {
        let text = self.fetch_file_text(base, file_name).await?;
        let excerpt: String = text.chars().take(README_EXCERPT_LIMIT).collect();
        debug!(file = file_name, chars = excerpt.chars().count(), "README excerpt captured");
        (!excerpt.trim().is_empty()).then_some(excerpt)
    }

    /// Fetches `contents/{file}` and decodes its base64 payload to text
    async fn fetch_file_text(&self, base: &str, file_name: &str) -> Option<String> {
        let path = format!("{}/contents/{}", base, file_name);
        let payload = self.fetch_enrichment::<FilePayload>(file_name, &path).await?;

        if let Some(encoding) = payload.encoding.as_deref() {
            if !encoding.eq_ignore_ascii_case("base64") {
                self.skip(file_name, format!("unsupported encoding '{}'", encoding));
                return None;
            }
        }

        match decode_base64_text(&payload.content) {
            Ok(text) => Some(text),
            Err(e) => {
                self.skip(file_name, format!("invalid base64 content: {}", e));
                None
            }
        }
    }

    /// GETs and deserializes an enrichment resource; any failure yields `None`
    async fn fetch_enrichment<T: DeserializeOwned>(&self, source: &str, path: &str) -> Option<T> {
        let response = match self.host.get(path).await {
            Ok(response) => response,
            Err(e) => {
                self.skip(source, e.to_string());
                return None;
            }
        };

        if !response.is_success() {
            self.skip(source, format!("HTTP {} {}", response.status, response.reason()));
            return None;
        }

        match response.json::<T>() {
            Ok(value) => Some(value),
            Err(e) => {
                self.skip(source, format!("unexpected response shape: {}", e));
                None
            }
        }
    }

    fn skip(&self, source: &str, reason: String) {
        warn!(source, %reason, "Enrichment unavailable, continuing without it");
        if let Some(handler) = &self.progress {
            handler.on_progress(&ProgressEvent::EnrichmentSkipped {
                source: source.to_string(),
                reason,
            });
        }
    }
}

/// First listing entry whose lowercase name starts with `readme.md`
fn find_readme(file_structure: &[String]) -> Option<&str> {
    file_structure
        .iter()
        .find(|name| name.to_lowercase().starts_with(README_PREFIX))
        .map(String::as_str)
}

/// Decodes a contents-API payload. The API wraps base64 at fixed columns, so
/// whitespace is dropped before decoding.
fn decode_base64_text(content: &str) -> Result<String, base64::DecodeError> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64.decode(compact.as_bytes())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
