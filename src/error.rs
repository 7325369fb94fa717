// Error type shared by the library modules. The binary wraps these in
// `anyhow` for context; workflows match on them only where a failure is
// tolerated (per-file uploads, group deletion).

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = FaceError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum FaceError {
    #[error("cannot read face api key from {}", path.display())]
    KeyMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("face service returned {status} ({code}): {message}")]
    RemoteApi {
        status: u16,
        code: String,
        message: String,
    },

    #[error("unexpected response from face service: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no value given for {0}")]
    EmptyArgument(&'static str),
}

impl FaceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FaceError::Io {
            path: path.into(),
            source,
        }
    }
}
