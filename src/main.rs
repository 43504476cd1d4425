//! permascript CLI entry point
//!
//! Parses arguments, sets up logging on stderr and renders errors with
//! their suggestions before exiting with status 1.

use anyhow::Result;
use clap::Parser;
use permascript::cli;
use permascript::core::user_friendly_error;
use tracing_subscriber::EnvFilter;

fn init_logging(level: Option<&str>) {
    // RUST_LOG wins over the -v/-q derived level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or("warn")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let config = cli.build_config();
    init_logging(config.log_level.as_deref());

    match cli.execute_with_config(config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            user_friendly_error(e).display();
            std::process::exit(1);
        }
    }
}
