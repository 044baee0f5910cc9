// Cache path utilities.
// Resolves the cache directory and the per-user repository list key.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/folio on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "folio").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the log file.
pub fn log_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("folio.log"))
}

/// Storage key for a user's repository list.
pub fn repos_key(username: &str) -> String {
    format!("{}Repos", username)
}

/// Path of a user's repository list under `root`.
pub fn repos_path(root: &Path, username: &str) -> PathBuf {
    root.join(format!("{}.json", sanitize_name(&repos_key(username))))
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("simple"), "simple");
        assert_eq!(sanitize_name("with/slash"), "with_slash");
        assert_eq!(sanitize_name("owner:name"), "owner_name");
    }

    #[test]
    fn test_repos_key() {
        assert_eq!(repos_key("alice"), "aliceRepos");
    }

    #[test]
    fn test_repos_path() {
        let root = Path::new("/tmp/folio");
        assert!(repos_path(root, "alice").ends_with("aliceRepos.json"));
        // A username can't escape the cache directory.
        assert_eq!(
            repos_path(root, "../etc"),
            root.join(".._etcRepos.json")
        );
    }
}
