//! Parsers turning configuration documents into release models
//!
//! A parser only populates fields. Merge, activation and export all live
//! in `relkit-model`.

use std::path::Path;

use relkit_model::ReleaseModel;

use crate::error::{Error, Result};

/// Parses one document format into a [`ReleaseModel`].
pub trait ConfigParser: Send + Sync {
    /// Human-readable format name, e.g. `"TOML"`
    fn format_name(&self) -> &'static str;

    /// File extensions handled, preferred one first
    fn extensions(&self) -> &'static [&'static str];

    fn parse(&self, content: &str) -> Result<ReleaseModel>;

    fn preferred_file_extension(&self) -> &'static str {
        self.extensions().first().copied().unwrap_or_default()
    }

    fn supports_extension(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }

    fn supports(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.supports_extension(e))
    }
}

/// Deserialize a document and name its nodes after their keys.
///
/// Whitespace-only content is an empty model in every format.
fn parse_with<E, F>(format: &str, content: &str, from_str: F) -> Result<ReleaseModel>
where
    E: std::fmt::Display,
    F: FnOnce(&str) -> std::result::Result<ReleaseModel, E>,
{
    if content.trim().is_empty() {
        return Ok(ReleaseModel::default());
    }
    let mut model = from_str(content).map_err(|e| Error::parse(format, e.to_string()))?;
    model.normalize_names();
    model.check_names()?;
    tracing::debug!(
        format,
        jlink = model.assemble.jlink.len(),
        ftp = model.download.ftp.len(),
        "Parsed configuration document"
    );
    Ok(model)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TomlParser;

impl ConfigParser for TomlParser {
    fn format_name(&self) -> &'static str {
        "TOML"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["toml"]
    }

    fn parse(&self, content: &str) -> Result<ReleaseModel> {
        parse_with(self.format_name(), content, toml::from_str)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl ConfigParser for YamlParser {
    fn format_name(&self) -> &'static str {
        "YAML"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["yml", "yaml"]
    }

    fn parse(&self, content: &str) -> Result<ReleaseModel> {
        parse_with(self.format_name(), content, |s| serde_yaml::from_str(s))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl ConfigParser for JsonParser {
    fn format_name(&self) -> &'static str {
        "JSON"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn parse(&self, content: &str) -> Result<ReleaseModel> {
        parse_with(self.format_name(), content, |s| serde_json::from_str(s))
    }
}
