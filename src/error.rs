//! Errors for the library; the binary wraps them with `anyhow`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("drawing surface unavailable (size {width}x{height})")]
    SurfaceUnavailable { width: f32, height: f32 },

    #[error("failed to load image {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid box data {0:?}: expected \"x|y|w|l\"")]
    InvalidBoxData(String),

    #[error("you need to add at least one textarea")]
    NoBoxes,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
