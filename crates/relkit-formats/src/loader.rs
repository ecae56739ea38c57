//! Loading configuration documents from disk

use std::fs;
use std::path::Path;

use relkit_model::ReleaseModel;

use crate::error::{Error, Result};
use crate::registry::ParserRegistry;

/// Reads configuration files and parses them with the registry's parsers.
#[derive(Debug, Clone, Copy)]
pub struct ConfigLoader<'a> {
    registry: &'a ParserRegistry,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(registry: &'a ParserRegistry) -> Self {
        Self { registry }
    }

    /// Load one file, picking the parser from its extension.
    pub fn load(&self, path: &Path) -> Result<ReleaseModel> {
        let parser = self.registry.parser_for(path).ok_or_else(|| {
            Error::UnsupportedFormat {
                extension: path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("")
                    .to_string(),
                supported: self.registry.supported_formats(),
            }
        })?;

        tracing::debug!(?path, format = parser.format_name(), "Loading config");
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        parser.parse(&content).map_err(|e| match e {
            Error::Parse { format, message } => Error::ParseFile {
                path: path.to_path_buf(),
                format,
                message,
            },
            other => other,
        })
    }

    /// Load several layers in order. Missing files are skipped; any other
    /// failure stops the whole load.
    pub fn load_layers<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<ReleaseModel>> {
        let mut layers = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            if !path.is_file() {
                tracing::debug!(?path, "No config layer found, skipping");
                continue;
            }
            layers.push(self.load(path)?);
        }
        Ok(layers)
    }
}
