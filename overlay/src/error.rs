//! Rendering errors

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The pixel buffer could not be created (zero or oversized dimensions)
    #[error("cannot allocate a {width}x{height} pixmap")]
    Allocation { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("unknown output format {0:?} (expected png or svg)")]
    UnknownFormat(String),

    #[error("IO error writing {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
