use std::path::PathBuf;
use thiserror::Error;

/// The main error type for legends operations.
#[derive(Debug, Error)]
pub enum LegendsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to probe image dimensions at {path}: {source}")]
    ImageProbe {
        path: PathBuf,
        #[source]
        source: imagesize::ImageError,
    },

    #[error("Failed to parse project JSON from {path}: {source}")]
    ProjectJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write project JSON to {path}: {source}")]
    ProjectJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
