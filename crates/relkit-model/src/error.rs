//! Error types for relkit-model

/// Result type for relkit-model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised for invalid model shapes.
///
/// "Not enabled" and "not configured" are valid states and never show up
/// here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A node reached export without a name to key it by
    #[error("Cannot export {node_type} node without a name")]
    MissingName { node_type: &'static str },

    /// Two entries of one aggregator section share a name
    #[error("Duplicate {section} entry named '{name}'")]
    DuplicateName { section: String, name: String },

    #[error("Invalid activation mode: {value}")]
    InvalidActivation { value: String },

    #[error("Invalid snapshot pattern '{pattern}': {source}")]
    InvalidSnapshotPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unknown authorization: {value}")]
    UnknownAuthorization { value: String },

    #[error("Unknown archive format: {value}")]
    UnknownArchiveFormat { value: String },
}

impl Error {
    pub fn duplicate(section: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            section: section.into(),
            name: name.into(),
        }
    }
}
