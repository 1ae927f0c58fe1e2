use std::process;

use clap::Parser;
use dclock_cli::cli::Cli;
use dclock_cli::{commands, logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let guard = match logging::init(cli.verbose, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = commands::run(cli).await {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        // Flush buffered log lines before exiting
        drop(guard);
        process::exit(1);
    }
}
