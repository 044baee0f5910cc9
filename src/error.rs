// Error types for folio.
// Covers GitHub API errors, cache errors, and user input errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("GitHub API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: String },

    #[error("Username not found: pass --user or a query with user=<name>")]
    MissingUser,

    #[error("Invalid GitHub username: {0:?}")]
    InvalidUser(String),

    #[error("Invalid page size: {0:?}")]
    InvalidPageSize(String),

    #[error("No cached repositories for {0}")]
    CacheMiss(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, FolioError>;
