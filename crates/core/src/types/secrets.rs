//! Contract with the external secret store

use async_trait::async_trait;
use std::collections::HashMap;

/// Key/value contents of one secret bundle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretBundle(HashMap<String, String>);

impl SecretBundle {
    #[must_use]
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&String> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for SecretBundle
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Failure kinds reported by a secret store
///
/// The engine treats every kind the same way; the distinction exists for
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("secret bundle not found: {0}")]
    NotFound(String),

    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("transient failure: {0}")]
    Transient(String),

    #[error("malformed secret bundle: {0}")]
    Malformed(String),
}

/// Fetches secret bundles by identifier
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the full bundle identified by `bundle_id`
    async fn fetch(&self, bundle_id: &str) -> std::result::Result<SecretBundle, FetchError>;
}
