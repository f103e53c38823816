//! allcpp-search CLI
//!
//! Local execution entry point. For AWS Lambda, use `allcpp-search-lambda`.

use std::path::PathBuf;

use allcpp_search::{
    error::Result,
    handler::{self, SearchRequest},
    models::Config,
    pipeline::SearchService,
};
use clap::{Parser, Subcommand};

/// allcpp-search - Keyword search over allcpp events
#[derive(Parser, Debug)]
#[command(
    name = "allcpp-search",
    version,
    about = "Keyword search over the allcpp event listing"
)]

struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "allcpp-search.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search events by keyword and print the JSON envelope
    Search {
        /// Search keyword
        msg: String,

        /// Diagnostic passthrough: "raw" or "response"
        #[arg(long)]
        debug: Option<String>,
    },

    /// Validate configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config);
    init_logging(cli.verbose, &config.logging.level);

    match cli.command {
        Command::Search { msg, debug } => {
            config.validate()?;
            let service = SearchService::from_config(&config)?;

            let request = SearchRequest { msg, debug };
            let envelope = handler::handle(&service, &request).await;

            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }
    }

    Ok(())
}
