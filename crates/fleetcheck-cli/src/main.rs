//! fleetcheck — fleet health checker.
//!
//! Loads the agent fleet from a TOML config, runs one bounded-concurrency
//! check pass, and renders the reports as text or JSON.
//!
//! # Usage
//!
//! ```text
//! fleetcheck --config fleetcheck.toml
//! fleetcheck --json
//! fleetcheck --write-config        # scaffold a starter config
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use fleetcheck_core::Config;

mod render;

#[derive(Parser)]
#[command(
    name = "fleetcheck",
    about = "Probe a fleet of agents for health and tail their logs",
    version,
)]
struct Cli {
    /// Path to the TOML config.
    #[arg(short, long, default_value = "fleetcheck.toml")]
    config: PathBuf,

    /// Emit the reports as pretty-printed JSON.
    #[arg(long)]
    json: bool,

    /// If the config file is missing, write a starter config there and exit.
    #[arg(long)]
    write_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,fleetcheck=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if !cli.config.exists() {
        if cli.write_config {
            std::fs::write(&cli.config, Config::scaffold().to_toml_string()?)
                .with_context(|| format!("failed to write {}", cli.config.display()))?;
            eprintln!(
                "wrote starter config to {}; edit it and re-run",
                cli.config.display()
            );
            return Ok(());
        }
        anyhow::bail!(
            "config file {} not found (use --write-config to create a starter)",
            cli.config.display()
        );
    }

    let mut config = Config::from_file(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    config.apply_defaults();
    config.validate()?;

    let reports = fleetcheck_runner::run_checks(&config).await?;
    info!(agents = reports.len(), "check pass complete");

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print!("{}", render::render_text(&reports));
    }
    Ok(())
}
