use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use river_cli::{
    cli::{Cli, Commands, LogLevel},
    commands::{self, Session},
    config::CliConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration with CLI overrides
    let config = CliConfig::load(cli.config.clone(), cli.kiln.clone(), cli.pick)?;

    // Initialize logging: --verbose > --log-level > config file > warn
    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        cli.log_level
            .or(config.logging.level)
            .unwrap_or(LogLevel::Warn)
    };
    init_logging(level.into());
    debug!(kiln = %config.kiln.path.display(), picker = ?config.picker.mode, "configuration loaded");

    if let Commands::Config(cmd) = cli.command {
        return commands::config::execute(cmd, &config, cli.format).await;
    }

    let session = Session::open(&config, cli.format).await?;
    match cli.command {
        Commands::Previous { note } => commands::navigate::previous(&session, &note),
        Commands::Next { note } => commands::navigate::next(&session, &note).await,
        Commands::First { note } => commands::navigate::first(&session, &note),
        Commands::Last { note } => commands::navigate::last(&session, &note).await,
        Commands::Detach { note } => commands::edit::detach(&session, &note).await,
        Commands::InsertAfter { note, target } => {
            commands::edit::insert_after(&session, &note, &target).await
        }
        Commands::InsertAtHead { note, chain } => {
            commands::edit::insert_at_head(&session, &note, &chain).await
        }
        Commands::InsertToLast { note, chain } => {
            commands::edit::insert_to_last(&session, &note, chain.as_deref()).await
        }
        Commands::Config(_) => Ok(()),
    }
}

fn init_logging(level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
