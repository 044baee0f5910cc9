// GitHub API response types.
// Defines structs for deserializing the user profile and repository list.

use serde::{Deserialize, Serialize};

pub const NO_DESCRIPTION: &str = "No description";
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// GitHub user profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub followers: Option<u64>,
    #[serde(default)]
    pub following: Option<u64>,
    #[serde(default)]
    pub public_repos: Option<u64>,
}

/// One entry of a user's repository list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl Item {
    #[cfg(test)]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            language: None,
        }
    }

    /// Description for display, falling back when absent or blank.
    pub fn description_or_default(&self) -> &str {
        non_empty(self.description.as_deref()).unwrap_or(NO_DESCRIPTION)
    }

    /// Language for display, falling back when absent or blank.
    pub fn language_or_default(&self) -> &str {
        non_empty(self.language.as_deref()).unwrap_or(UNKNOWN_LANGUAGE)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RateLimit {
    pub limit: u32,
    pub remaining: u32,
    pub reset: u64,
}

impl RateLimit {
    /// Whether any rate limit headers have been seen yet.
    pub fn is_known(&self) -> bool {
        self.limit > 0
    }
}
