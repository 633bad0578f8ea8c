use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod config;
mod script;

/// Replays a recorded drag gesture script against an image frame and prints the
/// resulting position and document metadata.
#[derive(Parser, Debug)]
struct Cli {
    /// Gesture script (JSON).
    script: PathBuf,
    /// Settings file (TOML); `APP__*` environment variables override it.
    #[arg(long)]
    settings: Option<PathBuf>,
    #[arg(long, default_value = "app://vault")]
    resource_root: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let cli = Cli::parse();

    let settings = config::load_settings(cli.settings.as_deref())?;
    let raw = tokio::fs::read_to_string(&cli.script)
        .await
        .with_context(|| format!("failed to read script '{}'", cli.script.display()))?;
    let recorded: script::Script = serde_json::from_str(&raw)
        .with_context(|| format!("invalid gesture script '{}'", cli.script.display()))?;

    let report = script::run_script(recorded, &settings, &cli.resource_root).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
