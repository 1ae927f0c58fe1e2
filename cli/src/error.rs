//! Errors surfaced by `dclock` commands

use std::path::PathBuf;

use dclock_core::{ClockError, ConfigError};
use dclock_overlay::RenderError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Clock(#[from] ClockError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML encoding failed: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("cannot open log file {path:?}: {source}")]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no output path given and none configured")]
    MissingOutput,

    #[error("renderer thread panicked")]
    RendererPanicked,
}
