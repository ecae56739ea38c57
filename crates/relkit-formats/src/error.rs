//! Error types for relkit-formats

use std::path::PathBuf;

/// Result type for relkit-formats operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config: {message}")]
    Parse { format: String, message: String },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ParseFile {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}. Must be one of [{}]", .supported.join("|"))]
    UnsupportedFormat {
        extension: String,
        supported: Vec<String>,
    },

    #[error(transparent)]
    Model(#[from] relkit_model::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            format: format.into(),
            message: message.into(),
        }
    }
}
