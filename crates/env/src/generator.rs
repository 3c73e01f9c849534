//! Env file content generation

use crate::resolver::{EnvLookup, ValueResolver};
use envgen_cache::SecretCache;
use envgen_core::{
    Error, GenerationResult, ResolutionOutcome, SecretStore, Template, DEFAULT_MAX_CONCURRENT,
};
use std::borrow::Cow;
use std::sync::Arc;

/// Tuning for a generation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Maximum number of variables resolved at once
    pub max_concurrent: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }
}

/// Renders templates into `KEY=VALUE` content
pub struct ContentGenerator {
    env: Arc<dyn EnvLookup>,
    store: Arc<dyn SecretStore>,
    options: GeneratorOptions,
}

impl ContentGenerator {
    pub fn new(env: Arc<dyn EnvLookup>, store: Arc<dyn SecretStore>) -> Self {
        Self::with_options(env, store, GeneratorOptions::default())
    }

    pub fn with_options(
        env: Arc<dyn EnvLookup>,
        store: Arc<dyn SecretStore>,
        options: GeneratorOptions,
    ) -> Self {
        Self {
            env,
            store,
            options,
        }
    }

    pub fn options(&self) -> GeneratorOptions {
        self.options
    }

    /// A resolver with a fresh secret cache, for one pass
    pub fn resolver(&self) -> ValueResolver {
        let cache = SecretCache::new(Arc::clone(&self.store));
        ValueResolver::new(Arc::clone(&self.env), Arc::new(cache))
    }

    /// Resolve every variable and render the env file
    ///
    /// Never stops at the first failure: the result carries every error, in
    /// template order. Writing the content out is left to the caller.
    pub async fn generate(&self, template: &Template) -> GenerationResult {
        let resolver = self.resolver();
        let outcomes = resolver
            .resolve_all(template, self.options.max_concurrent)
            .await;

        let mut lines = Vec::new();
        let mut errors = Vec::new();

        for ((name, config), outcome) in template.iter().zip(outcomes) {
            match outcome {
                ResolutionOutcome::Value(value) => lines.push(format_line(name, &value)),
                ResolutionOutcome::Absent if config.required => {
                    errors.push(Error::unresolved_required(name).to_string());
                }
                ResolutionOutcome::Absent => {
                    tracing::debug!(variable = %name, "optional variable has no value, skipping");
                }
                ResolutionOutcome::Failed(e) if config.required => errors.push(e.to_string()),
                ResolutionOutcome::Failed(e) => {
                    tracing::debug!(variable = %name, error = %e, "optional variable failed, skipping");
                }
            }
        }

        let stats = resolver.secrets().stats();
        tracing::info!(
            variables = template.len(),
            emitted = lines.len(),
            errors = errors.len(),
            secret_fetches = stats.fetches,
            secret_cache_hits = stats.hits,
            secret_failures = stats.failures,
            "generated env content"
        );

        GenerationResult::new(render(&lines), lines.len(), errors)
    }
}

/// Quote a value when it contains a newline, a double quote, or a space
///
/// Inside quotes each `"` is escaped as `\"`. Nothing else is escaped.
pub fn escape_value(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '"', ' ']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\\\"")))
    } else {
        Cow::Borrowed(value)
    }
}

fn format_line(name: &str, value: &str) -> String {
    format!("{name}={}", escape_value(value))
}

fn render(lines: &[String]) -> String {
    if lines.is_empty() {
        String::new()
    } else {
        let mut content = lines.join("\n");
        content.push('\n');
        content
    }
}
