//! Subcommand implementations

mod render;
mod show_config;
mod state;
mod watch;

pub use render::output_format;
pub use state::{describe, ring_diagram};

use dclock_core::load_config;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Load the configuration and dispatch to the selected subcommand.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::State(args) => state::run(&args, &config),
        Command::Render(args) => render::run(&args, &config),
        Command::Watch(args) => watch::run(args, config).await,
        Command::Config(args) => show_config::run(&args, &config, cli.config.as_deref()),
    }
}
