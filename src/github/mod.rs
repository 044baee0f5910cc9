// GitHub API module.
// Provides the client and types for the user profile and repository endpoints.

pub mod client;
pub mod endpoints;
pub mod types;

#[cfg(test)]
pub mod test_server;

pub use client::{GITHUB_API_BASE, GitHubClient};
pub use types::*;
