// GitHub API HTTP client.
// Handles optional authentication, rate limit tracking, and response status checks.

use std::sync::{Mutex, PoisonError};

use reqwest::{
    Client, Response, StatusCode, Url,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{FolioError, Result};

use super::types::RateLimit;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub API client with optional authentication and rate limit tracking.
///
/// Requests take `&self` so two fetches can share one client across tasks.
#[derive(Debug)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
    rate_limit: Mutex<RateLimit>,
}

impl GitHubClient {
    /// Create a new client against `base_url`, authenticating when a token is given.
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| FolioError::Other(e.to_string()))?,
            );
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("folio-tui"));

        let builder = Client::builder().default_headers(headers);
        // Tests talk to a local server; keep proxy settings out of the way.
        #[cfg(test)]
        let builder = builder.no_proxy();

        let client = builder
            .build()
            .map_err(FolioError::Api)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            rate_limit: Mutex::new(RateLimit::default()),
        })
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the most recent rate limit information.
    pub fn rate_limit(&self) -> RateLimit {
        *self
            .rate_limit
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// URL for `segments` under the base URL, each escaped as one path segment.
    pub fn url_for(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| FolioError::Other(format!("Invalid API base {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| FolioError::Other(format!("API base cannot take a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Make a GET request to the GitHub API.
    pub async fn get(&self, segments: &[&str]) -> Result<Response> {
        let url = self.url_for(segments)?;
        tracing::debug!(%url, "GET");
        let response = self.client.get(url).send().await.map_err(FolioError::Api)?;

        self.update_rate_limit(&response);
        self.check_response(response).await
    }

    /// Update rate limit from response headers.
    fn update_rate_limit(&self, response: &Response) {
        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };

        let mut rate_limit = self
            .rate_limit
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(limit) = header("x-ratelimit-limit").and_then(|v| v.parse().ok()) {
            rate_limit.limit = limit;
        }
        if let Some(remaining) = header("x-ratelimit-remaining").and_then(|v| v.parse().ok()) {
            rate_limit.remaining = remaining;
        }
        if let Some(reset) = header("x-ratelimit-reset").and_then(|v| v.parse().ok()) {
            rate_limit.reset = reset;
        }
    }

    /// Check response status and convert errors.
    async fn check_response(&self, response: Response) -> Result<Response> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(FolioError::Unauthorized),
            StatusCode::NOT_FOUND => {
                let url = response.url().to_string();
                Err(FolioError::NotFound(url))
            }
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
                if self.rate_limit().remaining == 0 && self.rate_limit().is_known() =>
            {
                let reset_at = chrono::DateTime::from_timestamp(self.rate_limit().reset as i64, 0)
                    .map(|dt| dt.format("%H:%M:%S").to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                Err(FolioError::RateLimited { reset_at })
            }
            status => Err(FolioError::Other(format!(
                "HTTP {}: {}",
                status,
                response.text().await.unwrap_or_default()
            ))),
        }
    }
}
