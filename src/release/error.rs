use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("Failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{key} not found in {path:?}")]
    MissingKey { path: PathBuf, key: &'static str },

    #[error("Invalid {key} value '{value}' in {path:?}")]
    InvalidValue {
        path: PathBuf,
        key: &'static str,
        value: String,
    },

    #[error("Version file {0:?} already exists")]
    AlreadyExists(PathBuf),
}
