// Passbank — Application Entry Point
//
// Parses CLI arguments, initializes structured logging on stderr (so prompts
// on stdout stay readable), and dispatches to the command handler.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use passbank::cli::{execute, Cli};

fn main() {
    // RUST_LOG=passbank=debug for verbose output. No level ever includes secret values.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("passbank=warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
