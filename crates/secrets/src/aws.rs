//! AWS Secrets Manager backend
//!
//! Fetches a secret with
//! `aws secretsmanager get-secret-value --secret-id <id> --query SecretString --output text`
//! and reads its `SecretString` as a flat JSON object.

use crate::command_executor::{CommandExecutor, SystemCommandExecutor};
use async_trait::async_trait;
use envgen_core::{FetchError, SecretBundle, SecretStore};
use serde_json::Value;

/// How to invoke the AWS CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsSecretStoreConfig {
    /// Executable name or path
    pub cli: String,
    /// Named profile, passed as `--profile`
    pub profile: Option<String>,
    /// Region override, passed as `--region`
    pub region: Option<String>,
}

impl Default for AwsSecretStoreConfig {
    fn default() -> Self {
        Self {
            cli: "aws".to_string(),
            profile: None,
            region: None,
        }
    }
}

/// Secret store backed by AWS Secrets Manager
pub struct AwsSecretStore {
    config: AwsSecretStoreConfig,
    executor: Box<dyn CommandExecutor>,
}

impl AwsSecretStore {
    /// Create a store that runs the real AWS CLI
    pub fn new(config: AwsSecretStoreConfig) -> Self {
        Self::with_executor(config, Box::new(SystemCommandExecutor))
    }

    /// Create a store with a custom executor
    pub fn with_executor(config: AwsSecretStoreConfig, executor: Box<dyn CommandExecutor>) -> Self {
        Self { config, executor }
    }

    fn command_args(&self, bundle_id: &str) -> Vec<String> {
        let mut args: Vec<String> = [
            "secretsmanager",
            "get-secret-value",
            "--secret-id",
            bundle_id,
            "--query",
            "SecretString",
            "--output",
            "text",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        if let Some(profile) = &self.config.profile {
            args.push("--profile".to_string());
            args.push(profile.clone());
        }
        if let Some(region) = &self.config.region {
            args.push("--region".to_string());
            args.push(region.clone());
        }
        args
    }
}

#[async_trait]
impl SecretStore for AwsSecretStore {
    async fn fetch(&self, bundle_id: &str) -> Result<SecretBundle, FetchError> {
        let args = self.command_args(bundle_id);
        tracing::debug!(bundle = %bundle_id, cli = %self.config.cli, "querying AWS Secrets Manager");

        let output = self
            .executor
            .execute(&self.config.cli, &args)
            .await
            .map_err(|e| FetchError::Transient(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(bundle_id, &stderr, output.status.code()));
        }

        let stdout = String::from_utf8(output.stdout).map_err(|e| {
            FetchError::Malformed(format!("secret '{bundle_id}' is not valid UTF-8: {e}"))
        })?;
        parse_secret_string(bundle_id, stdout.trim())
    }
}

/// Map AWS CLI stderr onto a fetch failure kind
fn classify_failure(bundle_id: &str, stderr: &str, exit_code: Option<i32>) -> FetchError {
    let detail = match stderr.trim() {
        "" => match exit_code {
            Some(code) => format!("aws exited with code {code}"),
            None => "aws terminated by signal".to_string(),
        },
        text => text.to_string(),
    };
    let message = format!("{bundle_id}: {detail}");

    if detail.contains("ResourceNotFoundException") {
        FetchError::NotFound(message)
    } else if detail.contains("AccessDenied") {
        FetchError::AccessDenied(message)
    } else {
        FetchError::Transient(message)
    }
}

/// Parse a `SecretString` holding a flat JSON object
fn parse_secret_string(bundle_id: &str, text: &str) -> Result<SecretBundle, FetchError> {
    let value: Value = serde_json::from_str(text).map_err(|e| {
        FetchError::Malformed(format!("secret '{bundle_id}' is not valid JSON: {e}"))
    })?;

    let Value::Object(map) = value else {
        return Err(FetchError::Malformed(format!(
            "secret '{bundle_id}' is not a JSON object"
        )));
    };

    let mut bundle = SecretBundle::new();
    for (key, value) in map {
        match value {
            Value::String(s) => {
                bundle.insert(key, s);
            }
            Value::Number(n) => {
                bundle.insert(key, n.to_string());
            }
            Value::Bool(b) => {
                bundle.insert(key, b.to_string());
            }
            _ => {
                tracing::warn!(bundle = %bundle_id, key = %key, "skipping non-scalar secret value");
            }
        }
    }
    Ok(bundle)
}
