// Profile panel state.
// Display strings for the profile fields, with fallbacks for missing data.

use crate::github::Profile;

use super::view::sanitize;

pub const LOADING: &str = "Loading...";
const AVATAR_FALLBACK: &str = "placeholder_image_url";
const LOGIN_FALLBACK: &str = "Username";
const BIO_FALLBACK: &str = "No bio available";
const LINK_FALLBACK: &str = "#";

/// Text shown in the profile panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub avatar_url: String,
    pub login: String,
    pub bio: String,
    pub profile_url: String,
    pub followers: String,
    pub following: String,
    pub public_repos: String,
}

impl Default for ProfileView {
    fn default() -> Self {
        Self::from_profile(None)
    }
}

impl ProfileView {
    /// Placeholders shown while the fetch is in flight.
    pub fn loading() -> Self {
        Self::default()
    }

    /// Fill fields from a fetched profile; `None` means it was unavailable.
    pub fn from_profile(profile: Option<&Profile>) -> Self {
        let text = |field: Option<&String>, fallback: &str| {
            field
                .filter(|v| !v.is_empty())
                .map(|v| sanitize(v))
                .unwrap_or_else(|| fallback.to_string())
        };
        let count = |field: Option<u64>| {
            field
                .map(|n| n.to_string())
                .unwrap_or_else(|| LOADING.to_string())
        };

        Self {
            avatar_url: text(profile.and_then(|p| p.avatar_url.as_ref()), AVATAR_FALLBACK),
            login: text(profile.and_then(|p| p.login.as_ref()), LOGIN_FALLBACK),
            bio: text(profile.and_then(|p| p.bio.as_ref()), BIO_FALLBACK),
            profile_url: text(profile.and_then(|p| p.html_url.as_ref()), LINK_FALLBACK),
            followers: count(profile.and_then(|p| p.followers)),
            following: count(profile.and_then(|p| p.following)),
            public_repos: count(profile.and_then(|p| p.public_repos)),
        }
    }
}
