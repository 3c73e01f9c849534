//! Secret bundle cache for envgen
//!
//! One `SecretCache` lives for one resolution pass. It guarantees that each
//! bundle is fetched from the secret store at most once, and that concurrent
//! requests for the same bundle share a single in-flight fetch.

pub mod secret_cache;

pub use secret_cache::{CacheStatSnapshot, FetchResult, SecretCache};
