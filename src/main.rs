// src/main.rs
// =============================================================================
// Entry point of the mailjson binary.
//
// What happens here:
// 1. Set up logging (stderr, filtered by RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Build the service and run the chosen subcommand
// 4. Exit with proper code (0 = JSON found / clean shutdown,
//    1 = no JSON found, 2 = error)
// =============================================================================

use anyhow::Result;
use clap::Parser;
use mailjson::cli::{AppService, Cli, Commands};
use mailjson::server;
use mailjson::service::ExtractError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so `extract` output on stdout stays pipeable
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mailjson=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let service = cli.search.build_service()?;

    match cli.command {
        Commands::Serve { bind } => {
            server::serve(bind, service).await?;
            Ok(0)
        }
        Commands::Extract { path, compact } => handle_extract(&service, &path, compact).await,
    }
}

// Handles the 'extract' subcommand
async fn handle_extract(service: &AppService, path: &str, compact: bool) -> Result<i32> {
    match service.extract(path).await {
        Ok(value) => {
            let output = if compact {
                serde_json::to_string(&value)?
            } else {
                serde_json::to_string_pretty(&value)?
            };
            println!("{output}");
            Ok(0)
        }
        Err(ExtractError::NoJsonFound) => {
            eprintln!("No JSON found in email attachments or links");
            Ok(1)
        }
        Err(e) => Err(e.into()),
    }
}
