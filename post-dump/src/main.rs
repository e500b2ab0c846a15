//! Post Dump Main Entry Point
//!
//! Exports a post type as a replayable SQL script. The script goes to stdout,
//! or to a file with `--output-dir`; logs always go to stderr.

use std::env;
use std::io;

use clap::Parser;
use dotenv::dotenv;
use post_dump::cli::{Cli, Command};
use post_dump::{dump, DumpError};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("post_dump=info,post_dump_generator=info"));

    let json = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(io::stderr)
                    .pretty(),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), DumpError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Command::Dump(args) => {
            let post_type = args.post_type.clone();
            info!(
                post_type = %post_type,
                service_version = env!("CARGO_PKG_VERSION"),
                "Starting dump"
            );
            match dump::run(args).await {
                Ok(path) => {
                    info!(
                        post_type = %post_type,
                        path = ?path,
                        "Dump completed successfully"
                    );
                    Ok(())
                }
                Err(e) => {
                    error!(post_type = %post_type, error = %e, "Dump failed");
                    Err(e)
                }
            }
        }
    }
}
