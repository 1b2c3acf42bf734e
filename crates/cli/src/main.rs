//! Apseva CLI
//!
//! Main entry point for the apseva command-line tool: natural-language search
//! over Andhra Pradesh government services with curated, cited answers.

mod commands;

use apseva_core::{config::AppConfig, logging, AppResult};
use clap::{Parser, Subcommand};
use commands::{DomainsCommand, HealthCommand, SearchCommand};
use std::path::PathBuf;

/// Apseva CLI - AP government-services search with curated answers
#[derive(Parser, Debug)]
#[command(name = "apseva")]
#[command(about = "AP government-services search with curated answers", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "APSEVA_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// LLM provider (openai, claude, ollama)
    #[arg(short, long, global = true, env = "APSEVA_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "APSEVA_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask a government-services question
    Search(SearchCommand),

    /// List the trusted domain registry
    Domains(DomainsCommand),

    /// Show process health and registry size
    Health(HealthCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.config,
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    // Log startup
    tracing::info!("Apseva CLI starting");
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    // Emit command span
    let command_name = match &cli.command {
        Commands::Search(_) => "search",
        Commands::Domains(_) => "domains",
        Commands::Health(_) => "health",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Search(cmd) => cmd.execute(&config).await,
        Commands::Domains(cmd) => cmd.execute(&config).await,
        Commands::Health(cmd) => cmd.execute(&config).await,
    };

    // Log completion
    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
