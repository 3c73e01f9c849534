//! Single-flight cache keyed by secret bundle id

use dashmap::DashMap;
use envgen_core::{FetchError, SecretBundle, SecretStore};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Shared outcome of fetching one bundle
pub type FetchResult = std::result::Result<Arc<SecretBundle>, FetchError>;

/// Point-in-time cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStatSnapshot {
    /// Calls that reached the secret store
    pub fetches: u64,
    /// Calls answered without a new fetch (including waits on an in-flight fetch)
    pub hits: u64,
    /// Fetches that ended in an error
    pub failures: u64,
}

/// Per-pass secret cache with single-flight fetches
///
/// Failures are cached as well: once a bundle has failed, every later request
/// in the same pass observes the same error without calling the store again.
pub struct SecretCache {
    store: Arc<dyn SecretStore>,
    /// One slot per bundle; the first caller initialises it, the rest wait on it
    slots: DashMap<String, Arc<OnceCell<FetchResult>>>,
    fetches: AtomicU64,
    requests: AtomicU64,
    failures: AtomicU64,
}

impl SecretCache {
    /// Create an empty cache in front of `store`
    pub fn new(store: Arc<dyn SecretStore>) -> Self {
        Self {
            store,
            slots: DashMap::new(),
            fetches: AtomicU64::new(0),
            requests: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }

    /// Get a bundle, fetching it if no caller has done so yet
    pub async fn get(&self, bundle_id: &str) -> FetchResult {
        self.requests.fetch_add(1, Ordering::Relaxed);

        // Clone the slot out so the map shard lock is not held across the await
        let slot = self
            .slots
            .entry(bundle_id.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .value()
            .clone();

        slot.get_or_init(|| self.fetch(bundle_id)).await.clone()
    }

    async fn fetch(&self, bundle_id: &str) -> FetchResult {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(bundle = %bundle_id, "fetching secret bundle");

        match self.store.fetch(bundle_id).await {
            Ok(bundle) => {
                tracing::debug!(bundle = %bundle_id, keys = bundle.len(), "fetched secret bundle");
                Ok(Arc::new(bundle))
            }
            Err(e) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(bundle = %bundle_id, error = %e, "secret bundle fetch failed");
                Err(e)
            }
        }
    }

    /// Number of distinct bundles requested so far
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Get statistics
    pub fn stats(&self) -> CacheStatSnapshot {
        let fetches = self.fetches.load(Ordering::Relaxed);
        let requests = self.requests.load(Ordering::Relaxed);
        CacheStatSnapshot {
            fetches,
            hits: requests.saturating_sub(fetches),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}
