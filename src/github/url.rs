//! Repository URL resolution
//!
//! Accepts `http(s)://[www.]github.com/<owner>/<repo>[.git][/...]` and extracts the
//! owner/repo pair. Anything past the second path segment (tree paths, query
//! strings, fragments) is ignored.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// Owner/repository pair identifying a single hosted repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepositoryIdentifier {
    pub owner: String,
    pub repo: String,
}

impl RepositoryIdentifier {
    /// Builds an identifier, stripping a trailing `.git` from the repo name
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        let repo = repo.into();
        let repo = repo.strip_suffix(".git").map(str::to_string).unwrap_or(repo);
        Self {
            owner: owner.into(),
            repo,
        }
    }

    /// `owner/repo` form used in hosting API paths and log fields
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for RepositoryIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

fn repository_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?i:https?)://(?i:www\.)?(?i:github\.com)/([^/\s?#]+)/([^/\s?#]+)(?:[/?#]\S*)?$",
        )
        .expect("valid regex")
    })
}

/// Parses a GitHub repository URL into its owner/repo pair.
///
/// Returns `None` for anything that is not an http(s) GitHub repository URL:
/// empty input, a missing repo segment, whitespace inside a segment, a repo
/// segment that is empty once `.git` is removed, or a `.`/`..` segment.
///
/// # Example
///
/// ```
/// use aboutgen::github::parse_repository_url;
///
/// let id = parse_repository_url("https://github.com/facebook/react.git").unwrap();
/// assert_eq!(id.owner, "facebook");
/// assert_eq!(id.repo, "react");
/// assert!(parse_repository_url("not-a-url").is_none());
/// ```
pub fn parse_repository_url(url: &str) -> Option<RepositoryIdentifier> {
    let captures = repository_url_pattern().captures(url.trim())?;
    let owner = captures.get(1)?.as_str();
    let id = RepositoryIdentifier::new(owner, captures.get(2)?.as_str());

    if !is_path_segment(&id.owner) || !is_path_segment(&id.repo) {
        return None;
    }
    Some(id)
}

/// Dot segments would be resolved away by the HTTP client and escape `repos/`
fn is_path_segment(segment: &str) -> bool {
    !matches!(segment, "" | "." | "..")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(url: &str) -> Option<(String, String)> {
        parse_repository_url(url).map(|id| (id.owner, id.repo))
    }

    fn pair(owner: &str, repo: &str) -> Option<(String, String)> {
        Some((owner.to_string(), repo.to_string()))
    }

    #[test]
    fn test_https_url() {
        assert_eq!(parsed("https://github.com/facebook/react"), pair("facebook", "react"));
    }

    #[test]
    fn test_http_and_www() {
        assert_eq!(parsed("http://github.com/rust-lang/rust"), pair("rust-lang", "rust"));
        assert_eq!(
            parsed("https://www.github.com/rust-lang/cargo"),
            pair("rust-lang", "cargo")
        );
    }

    #[test]
    fn test_trailing_slash_and_git_suffix() {
        assert_eq!(parsed("https://github.com/tokio-rs/tokio/"), pair("tokio-rs", "tokio"));
        assert_eq!(parsed("https://github.com/tokio-rs/tokio.git"), pair("tokio-rs", "tokio"));
        assert_eq!(
            parsed("https://github.com/tokio-rs/tokio.git/"),
            pair("tokio-rs", "tokio")
        );
    }

    #[test]
    fn test_extra_segments_ignored() {
        assert_eq!(
            parsed("https://github.com/serde-rs/serde/tree/master/serde_derive"),
            pair("serde-rs", "serde")
        );
        assert_eq!(
            parsed("https://github.com/serde-rs/json?tab=readme#usage"),
            pair("serde-rs", "json")
        );
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert_eq!(parsed("  https://github.com/a/b \n"), pair("a", "b"));
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(parsed(""), None);
        assert_eq!(parsed("   "), None);
        assert_eq!(parsed("not-a-url"), None);
        assert_eq!(parsed("https://github.com/facebook"), None);
        assert_eq!(parsed("https://github.com/facebook/"), None);
        assert_eq!(parsed("https://gitlab.com/facebook/react"), None);
        assert_eq!(parsed("github.com/facebook/react"), None);
        assert_eq!(parsed("ftp://github.com/facebook/react"), None);
    }

    #[test]
    fn test_whitespace_segments_rejected() {
        assert_eq!(parsed("https://github.com/ /react"), None);
        assert_eq!(parsed("https://github.com/facebook/ "), None);
        assert_eq!(parsed("https://github.com/face book/react"), None);
    }

    #[test]
    fn test_dot_segments_rejected() {
        assert_eq!(parsed("https://github.com/facebook/.."), None);
        assert_eq!(parsed("https://github.com/../.."), None);
        assert_eq!(parsed("https://github.com/./react"), None);
        assert_eq!(parsed("https://github.com/facebook/..git"), None);
        assert_eq!(parsed("https://github.com/facebook/.github"), pair("facebook", ".github"));
    }

    #[test]
    fn test_bare_git_suffix_rejected() {
        assert_eq!(parsed("https://github.com/facebook/.git"), None);
    }

    #[test]
    fn test_identifier_display() {
        let id = RepositoryIdentifier::new("facebook", "react.git");
        assert_eq!(id.repo, "react");
        assert_eq!(id.to_string(), "facebook/react");
        assert_eq!(id.slug(), "facebook/react");
    }
}
