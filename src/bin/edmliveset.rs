mod commands;

use clap::Parser;
use commands::{execute_command, Commands, OutputOptions};
use edmliveset::{ClientConfig, LiveSetClientImpl};

/// Browse and search the EDM Liveset catalog
#[derive(Parser)]
#[command(
    name = "edmliveset",
    about = "Browse and search the EDM Liveset catalog",
    long_about = None
)]
struct Cli {
    /// Show detailed debug information
    #[arg(long, global = true)]
    verbose: bool,

    /// Print results as JSON lines instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Index of the first item to show
    #[arg(long, global = true, default_value = "0")]
    offset: usize,

    /// Maximum number of items to show
    #[arg(long, global = true, default_value = "20")]
    limit: usize,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose {
        logger.filter_module("edmliveset", log::LevelFilter::Debug);
    }
    logger.init();

    let config = ClientConfig::from_env();
    log::debug!("Using catalog at {}", config.base_url);

    let http_client = http_client::native::NativeClient::new();
    let client = LiveSetClientImpl::with_config(Box::new(http_client), config);

    let options = OutputOptions {
        json: args.json,
        offset: args.offset,
        limit: args.limit,
    };

    if let Err(e) = execute_command(args.command, &client, &options).await {
        eprintln!("❌ Command failed: {e}");
        std::process::exit(1);
    }

    Ok(())
}
