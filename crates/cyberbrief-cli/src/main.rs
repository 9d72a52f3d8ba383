use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cyberbrief_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "cyberbrief")]
#[command(author, version, about = "Daily executive cybersecurity threat digest")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the JSON configuration file
    #[arg(short, long, default_value = "config.json", global = true)]
    config: PathBuf,

    /// Treat a missing config file as a fatal error
    #[arg(long, global = true)]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the digest, save it, and attempt email delivery
    Run,
    /// Generate the digest and print it to stdout (no email)
    Preview,
    /// List configured sources
    Sources,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config, cli.strict)?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(&config).await,
        Some(Commands::Preview) => commands::preview::run(&config).await,
        Some(Commands::Sources) => commands::sources::run(&config),
    }
}
