// GitHub API endpoint functions.
// Fetches the user profile and repository list.

use serde::de::DeserializeOwned;

use crate::error::Result;

use super::client::GitHubClient;
use super::types::{Item, Profile};

impl GitHubClient {
    /// Fetch `/users/<segments...>` and decode the body.
    ///
    /// Transport, status, and decode errors are logged here and returned so
    /// the caller can show the reason; callers treat them as "unavailable".
    pub async fn fetch_user_data<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let result = self.try_fetch_user_data(segments).await;
        if let Err(e) = &result {
            tracing::error!(path = %segments.join("/"), error = %e, "Error fetching user data");
        }
        result
    }

    async fn try_fetch_user_data<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let path: Vec<&str> = std::iter::once("users").chain(segments.iter().copied()).collect();
        let response = self.get(&path).await?;
        let bytes = response.bytes().await?;
        let data = serde_json::from_slice(&bytes)?;
        Ok(data)
    }

    /// Get a user's profile.
    pub async fn fetch_profile(&self, username: &str) -> Result<Profile> {
        self.fetch_user_data(&[username]).await
    }

    /// Get a user's repositories. All items are expected in one response.
    pub async fn fetch_items(&self, username: &str) -> Result<Vec<Item>> {
        self.fetch_user_data(&[username, "repos"]).await
    }
}
