//! Prompt compilation
//!
//! Renders a [`RepositoryData`](crate::github::RepositoryData) record plus optional
//! user hints into a single [`GenerationRequest`]. Compilation is pure: no I/O,
//! no failure modes.

mod compiler;
mod profile;

pub use compiler::{compile, GenerationRequest, DEPENDENCY_LIMIT, LANGUAGE_LIMIT};
pub use profile::{Hints, Profile};
