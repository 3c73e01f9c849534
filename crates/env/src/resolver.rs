//! Per-variable value resolution

use envgen_cache::SecretCache;
use envgen_core::{
    Error, ResolutionOutcome, Source, Template, VariableConfig, BUNDLE_KEY_SEPARATOR,
    SOURCE_REMOTE_SECRET, SUPPORTED_SOURCES,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Read access to an environment
pub trait EnvLookup: Send + Sync {
    /// Value of `name`, if set
    fn get(&self, name: &str) -> Option<String>;
}

/// The real process environment
///
/// Values that are not valid Unicode are read lossily rather than treated as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        let value = std::env::var_os(name)?;
        match value.into_string() {
            Ok(value) => Some(value),
            Err(raw) => {
                tracing::warn!(variable = %name, "environment value is not valid Unicode, replacing invalid bytes");
                Some(raw.to_string_lossy().into_owned())
            }
        }
    }
}

/// A fixed environment, for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MapEnv(HashMap<String, String>);

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EnvLookup for MapEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Resolves variable rules against the environment and the secret cache
///
/// A resolver belongs to one pass; its cache is dropped with it.
pub struct ValueResolver {
    env: Arc<dyn EnvLookup>,
    secrets: Arc<SecretCache>,
}

impl ValueResolver {
    pub fn new(env: Arc<dyn EnvLookup>, secrets: Arc<SecretCache>) -> Self {
        Self { env, secrets }
    }

    /// The secret cache used by this resolver
    pub fn secrets(&self) -> &SecretCache {
        &self.secrets
    }

    /// Resolve one variable
    ///
    /// `default` is the single fallback for every source: it fills in when the
    /// source yields nothing, and it suppresses secret store failures.
    pub async fn resolve(&self, config: &VariableConfig, name: &str) -> ResolutionOutcome {
        let default = config.default.as_ref();
        match &config.source {
            Source::Literal => ResolutionOutcome::or_default(config.value.clone(), default),
            Source::Environment => {
                let lookup = config.value.as_deref().unwrap_or(name);
                ResolutionOutcome::or_default(self.env.get(lookup), default)
            }
            Source::RemoteSecret => self.resolve_secret(config, name).await,
            Source::Unknown(other) => ResolutionOutcome::Failed(Error::configuration(format!(
                "Variable \"{name}\" has unsupported source \"{other}\"; supported sources: {}",
                SUPPORTED_SOURCES.join(", ")
            ))),
        }
    }

    async fn resolve_secret(&self, config: &VariableConfig, name: &str) -> ResolutionOutcome {
        let (bundle_id, key) = match parse_secret_reference(config.value.as_deref(), name) {
            Ok(reference) => reference,
            Err(e) => return ResolutionOutcome::Failed(e),
        };

        match self.secrets.get(bundle_id).await {
            Ok(bundle) => ResolutionOutcome::or_default(bundle.get(key).cloned(), config.default.as_ref()),
            Err(e) => match &config.default {
                Some(default) => {
                    tracing::debug!(
                        variable = %name,
                        bundle = %bundle_id,
                        error = %e,
                        "secret fetch failed, using default"
                    );
                    ResolutionOutcome::Value(default.clone())
                }
                None => ResolutionOutcome::Failed(Error::upstream(bundle_id, name, e)),
            },
        }
    }

    /// Resolve every variable of a template, at most `max_concurrent` at a time
    ///
    /// Outcomes are returned in declaration order regardless of completion order.
    pub async fn resolve_all(&self, template: &Template, max_concurrent: usize) -> Vec<ResolutionOutcome> {
        let semaphore = Semaphore::new(max_concurrent.max(1));
        let semaphore = &semaphore;

        let tasks = template.iter().map(|(name, config)| async move {
            // The semaphore is never closed, so acquire cannot fail
            let _permit = semaphore.acquire().await;
            let outcome = self.resolve(config, name).await;
            tracing::trace!(
                variable = %name,
                source = %config.source,
                resolved = outcome.value().is_some(),
                "resolved variable"
            );
            outcome
        });

        futures::future::join_all(tasks).await
    }
}

/// Split a `Bundle/Key` reference at its last separator
fn parse_secret_reference<'a>(value: Option<&'a str>, name: &str) -> Result<(&'a str, &'a str), Error> {
    let value = value.ok_or_else(|| {
        Error::configuration(format!(
            "Variable \"{name}\" with source {SOURCE_REMOTE_SECRET} requires a value in format Bundle/Key"
        ))
    })?;

    value.rsplit_once(BUNDLE_KEY_SEPARATOR).ok_or_else(|| {
        Error::configuration(format!(
            "Variable \"{name}\" value \"{value}\" must be in format Bundle/Key"
        ))
    })
}
