use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by profile loading, configuration and rendering.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid profile {}: {reason}", .path.display())]
    Profile { path: PathBuf, reason: String },

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Rendering failed: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
