//! GitHub hosting API integration
//!
//! This module turns a repository URL into a [`RepositoryData`] record:
//!
//! - [`url`]: parses `https://github.com/<owner>/<repo>` URLs
//! - [`host`]: the [`RepositoryHost`] transport seam and its reqwest implementation
//! - [`aggregator`]: the bounded sequence of hosting calls that builds the record
//! - [`types`]: wire types returned by the hosting API

pub mod aggregator;
pub mod host;
pub mod types;
pub mod url;

pub use aggregator::{MetadataAggregator, README_EXCERPT_LIMIT};
pub use host::{GitHubApi, HostError, HostResponse, MockRepositoryHost, RepositoryHost};
pub use types::RepositoryData;
pub use url::{parse_repository_url, RepositoryIdentifier};
