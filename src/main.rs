//! ZonePace - command line entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use zonepace::storage::config::load_config;

#[derive(Parser)]
#[command(
    name = "zonepace",
    version,
    about = "Best average running speed per heart rate zone across TCX files"
)]
struct Cli {
    /// Directory containing TCX activity files
    dir: PathBuf,

    /// Zone configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Logs go to stderr, the report to stdout
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;

    tracing::debug!("Scanning {:?} for {} activities", cli.dir, config.sport);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    zonepace::scan_directory(&cli.dir, &config, &mut out)
        .with_context(|| format!("Failed to scan {}", cli.dir.display()))?;

    Ok(())
}
