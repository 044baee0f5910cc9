// Cache module for local filesystem caching.
// Keeps each user's repository list on disk for offline viewing.

pub mod paths;
pub mod store;

pub use store::CacheStore;
