//! Runtime settings shared by every subcommand

use clap::Args;
use envgen_core::DEFAULT_MAX_CONCURRENT;
use envgen_env::{ContentGenerator, GeneratorOptions, ProcessEnv};
use envgen_secrets::{AwsSecretStore, AwsSecretStoreConfig};
use std::sync::Arc;

#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// AWS CLI executable used to read Secrets Manager
    #[arg(long, global = true, env = "ENVGEN_AWS_CLI", default_value = "aws")]
    pub aws_cli: String,

    /// AWS named profile
    #[arg(long, global = true, env = "ENVGEN_AWS_PROFILE")]
    pub aws_profile: Option<String>,

    /// AWS region
    #[arg(long, global = true, env = "ENVGEN_AWS_REGION")]
    pub aws_region: Option<String>,

    /// Maximum number of variables resolved at once
    #[arg(long, global = true, env = "ENVGEN_MAX_CONCURRENT", default_value_t = DEFAULT_MAX_CONCURRENT)]
    pub max_concurrent: usize,

    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Settings {
    pub fn store_config(&self) -> AwsSecretStoreConfig {
        AwsSecretStoreConfig {
            cli: self.aws_cli.clone(),
            profile: self.aws_profile.clone(),
            region: self.aws_region.clone(),
        }
    }

    /// Generator reading the process environment and AWS Secrets Manager
    pub fn generator(&self) -> ContentGenerator {
        ContentGenerator::with_options(
            Arc::new(ProcessEnv),
            Arc::new(AwsSecretStore::new(self.store_config())),
            GeneratorOptions {
                max_concurrent: self.max_concurrent,
            },
        )
    }
}
