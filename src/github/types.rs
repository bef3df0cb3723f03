//! Hosting API wire types and the aggregated repository record

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `GET /repos/{owner}/{repo}` response (only the fields we read)
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryMetadata {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub private: bool,
}

/// One entry of `GET /repos/{owner}/{repo}/contents`
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    pub name: String,
}

/// `GET /repos/{owner}/{repo}/contents/{path}` response for a file
#[derive(Debug, Clone, Deserialize)]
pub struct FilePayload {
    pub content: String,
    #[serde(default)]
    pub encoding: Option<String>,
}

/// Normalized view of one repository, built once per request.
///
/// `languages` keeps the order reported by the hosting API (largest first).
/// `file_structure` holds top-level entry names in listing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RepositoryData {
    pub name: String,
    pub description: Option<String>,
    pub languages: Vec<String>,
    pub file_structure: Vec<String>,
    pub package_manifest: Option<Map<String, Value>>,
    pub readme_excerpt: Option<String>,
}

impl RepositoryData {
    /// Creates a record with only a name; enrichment fields start empty
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// First `limit` languages in reported order
    pub fn top_languages(&self, limit: usize) -> &[String] {
        &self.languages[..self.languages.len().min(limit)]
    }

    /// Keys of the manifest's `dependencies` object, in document order
    pub fn dependency_names(&self, limit: usize) -> Vec<&str> {
        self.package_manifest
            .as_ref()
            .and_then(|manifest| manifest.get("dependencies"))
            .and_then(Value::as_object)
            .map(|deps| deps.keys().take(limit).map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Description text when present and non-blank
    pub fn current_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}
