use clap::Subcommand;
use envgen_core::{Result, DEFAULT_ENV_FILE};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::settings::Settings;

pub mod generate;
pub mod generate_template;
pub mod set_defaults;

#[derive(Subcommand)]
pub enum Commands {
    /// Generate an env file from a template
    #[command(visible_alias = "g")]
    Generate {
        /// Template file (.json, .yaml, .yml or .toml)
        template: PathBuf,

        /// Where to write the env file
        #[arg(short, long, default_value = DEFAULT_ENV_FILE)]
        output: PathBuf,

        /// Validate everything but do not write the env file
        #[arg(long)]
        dry_run: bool,
    },

    /// Create a template from an existing env file
    GenerateTemplate {
        /// Env file to read
        #[arg(short, long, default_value = DEFAULT_ENV_FILE)]
        source: PathBuf,

        /// Template file to write (.json, .yaml, .yml or .toml)
        output: PathBuf,
    },

    /// Store currently resolvable values as each variable's default
    SetDefaults {
        /// Template file to update in place
        template: PathBuf,
    },
}

impl Commands {
    pub async fn execute(self, settings: &Settings) -> Result<ExitCode> {
        match self {
            Commands::Generate {
                template,
                output,
                dry_run,
            } => generate::execute(settings, &template, &output, dry_run).await,
            Commands::GenerateTemplate { source, output } => {
                generate_template::execute(&source, &output)
            }
            Commands::SetDefaults { template } => set_defaults::execute(settings, &template).await,
        }
    }
}
