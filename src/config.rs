// Command line configuration.
// Resolves the target user, page size, API base, and token into a Config.

use clap::Parser;
use reqwest::Url;

use crate::error::{FolioError, Result};
use crate::github::GITHUB_API_BASE;
use crate::state::{DEFAULT_PAGE_SIZE, ViewState};

/// GitHub caps logins at this length.
const MAX_USERNAME_LEN: usize = 39;

/// Browse a GitHub user's profile and repositories.
#[derive(Debug, Parser)]
#[command(name = "folio", version, about)]
pub struct Cli {
    /// Query string or URL carrying the user, e.g. "user=alice" or "https://host/?user=alice".
    pub query: Option<String>,

    /// GitHub username (takes precedence over QUERY).
    #[arg(short, long)]
    pub user: Option<String>,

    /// Repositories per page.
    #[arg(short, long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = parse_page_size)]
    pub page_size: usize,

    /// GitHub API base URL.
    #[arg(long, default_value = GITHUB_API_BASE)]
    pub api_base: String,

    /// Token sent as a bearer credential.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Show the cached repository list without touching the network.
    #[arg(long)]
    pub offline: bool,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub user: String,
    pub page_size: usize,
    pub api_base: String,
    pub token: Option<String>,
    pub offline: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let user = cli
            .user
            .filter(|u| !u.is_empty())
            .or_else(|| cli.query.as_deref().and_then(user_from_query))
            .ok_or(FolioError::MissingUser)?;
        if !is_valid_username(&user) {
            return Err(FolioError::InvalidUser(user));
        }

        Ok(Self {
            user,
            page_size: cli.page_size,
            api_base: cli.api_base,
            token: cli.token.filter(|t| !t.is_empty()),
            offline: cli.offline,
        })
    }
}

/// Same rules as the interactive page size prompt.
fn parse_page_size(value: &str) -> std::result::Result<usize, String> {
    ViewState::default()
        .set_page_size(value)
        .map_err(|e| e.to_string())
}

/// ASCII letters, digits, and inner single hyphens.
pub fn is_valid_username(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_USERNAME_LEN
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !name.starts_with('-')
        && !name.ends_with('-')
        && !name.contains("--")
}

/// Extract a non-empty `user` parameter from a query string or URL.
pub fn user_from_query(query: &str) -> Option<String> {
    let url = Url::parse(query).or_else(|_| {
        let query = query.trim_start_matches('?');
        Url::parse(&format!("http://localhost/?{}", query))
    });

    url.ok()?
        .query_pairs()
        .find(|(key, _)| key == "user")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
