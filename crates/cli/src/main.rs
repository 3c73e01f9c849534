use clap::Parser;
use envgen_cli::{Commands, Settings};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "envgen")]
#[command(about = "Generate .env files from declarative templates", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> eyre::Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if let Err(e) = envgen_utils::logging::init(cli.settings.verbose) {
        eprintln!("warning: failed to initialize logging: {e}");
    }

    let code = cli.command.execute(&cli.settings).await?;
    Ok(code)
}
