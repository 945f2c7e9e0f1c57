//! Error types for map rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using RenderError.
pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse font: {0}")]
    FontLoad(PathBuf),

    #[error("Canvas error: {0}")]
    Canvas(String),
}

impl RenderError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn canvas(msg: impl Into<String>) -> Self {
        Self::Canvas(msg.into())
    }
}
