//! fsm - frida-server manager for Android devices

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fsm_cli::cli::Cli;
use fsm_cli::domain::error::error_code;
use fsm_cli::output::json::format_error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json = cli.json;
    if let Err(e) = cli.run().await {
        tracing::debug!(error = ?e, "command failed");
        let message = format!("{e:#}");
        match json.then(|| format_error(&message, error_code(&e))) {
            Some(Ok(obj)) => println!("{obj}"),
            _ => eprintln!("Error: {message}"),
        }
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr; `--verbose` wins over `RUST_LOG`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("fsm_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
