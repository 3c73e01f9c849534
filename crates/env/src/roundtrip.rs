//! Conversions between env files and templates

use crate::dotenv;
use crate::generator::ContentGenerator;
use envgen_core::{ResolutionOutcome, Template};

/// Derive a template from env file text
///
/// Keys keep their file order; each becomes a literal, required when its
/// current value is non-empty.
pub fn generate_template(env_file: &str) -> Template {
    let env = dotenv::parse(env_file);
    let template = Template::from_environment(&env);
    tracing::info!(variables = template.len(), "derived template from env file");
    template
}

/// Snapshot currently resolvable values into each variable's `default`
///
/// Variables that resolve to nothing, or fail, keep their existing default.
/// Returns the number of defaults written.
pub async fn refresh_defaults(generator: &ContentGenerator, template: &mut Template) -> usize {
    let resolver = generator.resolver();
    let outcomes = resolver
        .resolve_all(template, generator.options().max_concurrent)
        .await;

    let mut updated = 0;
    for ((name, config), outcome) in template.iter_mut().zip(outcomes) {
        match outcome {
            ResolutionOutcome::Value(value) => {
                config.default = Some(value);
                updated += 1;
            }
            ResolutionOutcome::Absent => {
                tracing::debug!(variable = %name, "no value to snapshot, keeping default");
            }
            ResolutionOutcome::Failed(e) => {
                tracing::debug!(variable = %name, error = %e, "resolution failed, keeping default");
            }
        }
    }

    tracing::info!(variables = template.len(), updated, "refreshed template defaults");
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::MapEnv;
    use async_trait::async_trait;
    use envgen_core::{FetchError, SecretBundle, SecretStore, Source, VariableConfig};
    use proptest::prelude::*;
    use std::sync::Arc;

    struct BundleStore;

    #[async_trait]
    impl SecretStore for BundleStore {
        async fn fetch(&self, bundle_id: &str) -> Result<SecretBundle, FetchError> {
            match bundle_id {
                "app" => Ok([("token", "s3cr3t")].into_iter().collect()),
                other => Err(FetchError::NotFound(other.to_string())),
            }
        }
    }

    fn generator(env: MapEnv) -> ContentGenerator {
        ContentGenerator::new(Arc::new(env), Arc::new(BundleStore))
    }

    #[test]
    fn test_generate_template_from_env_file() {
        let template = generate_template("# comment\nHOST=localhost\nEMPTY=\nGREETING=\"hi there\"\n");

        let names: Vec<_> = template.keys().cloned().collect();
        assert_eq!(names, vec!["HOST", "EMPTY", "GREETING"]);
        assert_eq!(template["HOST"], VariableConfig::literal("localhost").required(true));
        assert_eq!(template["EMPTY"], VariableConfig::literal("").required(false));
        assert_eq!(template["GREETING"].value.as_deref(), Some("hi there"));
        assert_eq!(template["GREETING"].source, Source::Literal);
    }

    #[tokio::test]
    async fn test_refresh_defaults_snapshots_values() {
        let generator = generator([("USER_NAME", "alice")].into_iter().collect());
        let mut template: Template = [
            ("USER_NAME", VariableConfig::environment(None).with_default("old")),
            ("TOKEN", VariableConfig::remote_secret("app/token")),
            ("LITERAL", VariableConfig::literal("x")),
        ]
        .into_iter()
        .collect();

        let updated = refresh_defaults(&generator, &mut template).await;

        assert_eq!(updated, 3);
        assert_eq!(template["USER_NAME"].default.as_deref(), Some("alice"));
        assert_eq!(template["TOKEN"].default.as_deref(), Some("s3cr3t"));
        assert_eq!(template["LITERAL"].default.as_deref(), Some("x"));
        // Rules themselves are untouched
        assert_eq!(template["USER_NAME"].source, Source::Environment);
        assert_eq!(template["TOKEN"].value.as_deref(), Some("app/token"));
    }

    #[tokio::test]
    async fn test_refresh_defaults_keeps_existing_on_absent_or_failure() {
        let generator = generator(MapEnv::new());
        let mut template: Template = [
            ("MISSING", VariableConfig::environment(None).required(true)),
            ("BROKEN", VariableConfig::remote_secret("nope").required(true)),
            ("GONE", VariableConfig::remote_secret("gone/key")),
            ("KEPT", VariableConfig::remote_secret("bad-ref").with_default("keep-me")),
        ]
        .into_iter()
        .collect();

        let updated = refresh_defaults(&generator, &mut template).await;

        assert_eq!(updated, 0);
        assert_eq!(template["MISSING"].default, None);
        assert_eq!(template["BROKEN"].default, None);
        assert_eq!(template["GONE"].default, None);
        assert_eq!(template["KEPT"].default.as_deref(), Some("keep-me"));
    }

    #[tokio::test]
    async fn test_refresh_defaults_uses_default_fallback_value() {
        // A failing fetch with a default resolves to that default, which is rewritten as-is
        let generator = generator(MapEnv::new());
        let mut template: Template = [(
            "HOST",
            VariableConfig::remote_secret("gone/host").with_default("localhost"),
        )]
        .into_iter()
        .collect();

        assert_eq!(refresh_defaults(&generator, &mut template).await, 1);
        assert_eq!(template["HOST"].default.as_deref(), Some("localhost"));
    }

    #[tokio::test]
    async fn test_generate_reproduces_source_env_file() {
        let original = "DATABASE_URL=postgres://localhost/app\nEMPTY=\nPORT=8080\n";
        let template = generate_template(original);

        let result = generator(MapEnv::new()).generate(&template).await;
        assert!(result.success);
        assert_eq!(result.content, original);
    }

    proptest! {
        #[test]
        fn prop_template_round_trip_reproduces_env_file(
            env in prop::collection::btree_map("[A-Z_][A-Z0-9_]{0,8}", "[A-Za-z0-9_./:@=-]{0,12}", 0..8)
        ) {
            let original: String = env.iter().map(|(k, v)| format!("{k}={v}\n")).collect();
            let template = generate_template(&original);

            // Re-source every key from the environment, holding the original values
            let rewired: Template = template
                .keys()
                .map(|name| (name.clone(), VariableConfig::environment(None)))
                .collect();
            let lookup: MapEnv = env.iter().map(|(k, v)| (k.clone(), v.clone())).collect();

            let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
            let result = runtime.block_on(generator(lookup).generate(&rewired));

            prop_assert!(result.success);
            prop_assert_eq!(result.content, original);
        }
    }
}
