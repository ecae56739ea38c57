//! Explicit registry of configuration parsers
//!
//! Built once at startup and handed to whoever needs to parse documents.
//! Parsers are never discovered implicitly.

use std::path::Path;

use indexmap::IndexSet;

use crate::parser::{ConfigParser, JsonParser, TomlParser, YamlParser};

/// Maps formats to parser implementations.
///
/// Lookups try parsers in registration order; the first match wins.
#[derive(Default)]
pub struct ParserRegistry {
    parsers: Vec<Box<dyn ConfigParser>>,
}

impl ParserRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the TOML, YAML and JSON parsers.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(TomlParser);
        registry.register(YamlParser);
        registry.register(JsonParser);
        registry
    }

    pub fn register(&mut self, parser: impl ConfigParser + 'static) {
        tracing::debug!(
            format = parser.format_name(),
            extension = parser.preferred_file_extension(),
            "Registering config parser"
        );
        self.parsers.push(Box::new(parser));
    }

    /// Find the parser for a file by its extension.
    pub fn parser_for(&self, path: &Path) -> Option<&dyn ConfigParser> {
        self.parsers
            .iter()
            .find(|p| p.supports(path))
            .map(|p| p.as_ref())
    }

    /// Find the parser for a bare extension such as `"yml"`.
    pub fn parser_for_format(&self, extension: &str) -> Option<&dyn ConfigParser> {
        self.parsers
            .iter()
            .find(|p| p.supports_extension(extension))
            .map(|p| p.as_ref())
    }

    /// Preferred extension of every registered parser, in order, without
    /// duplicates.
    pub fn supported_formats(&self) -> Vec<String> {
        self.parsers
            .iter()
            .map(|p| p.preferred_file_extension().to_string())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("formats", &self.supported_formats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_registry_is_empty() {
        let registry = ParserRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.parser_for(Path::new("relkit.toml")).is_none());
    }

    #[test]
    fn builtins_cover_toml_yaml_json() {
        let registry = ParserRegistry::with_builtins();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.supported_formats(), vec!["toml", "yml", "json"]);
    }

    #[test]
    fn lookup_by_path_and_extension() {
        let registry = ParserRegistry::with_builtins();

        let parser = registry.parser_for(Path::new("relkit.yaml")).unwrap();
        assert_eq!(parser.format_name(), "YAML");

        let parser = registry.parser_for_format("JSON").unwrap();
        assert_eq!(parser.format_name(), "JSON");

        assert!(registry.parser_for_format("xml").is_none());
    }

    #[test]
    fn supported_formats_are_unique() {
        let mut registry = ParserRegistry::with_builtins();
        registry.register(TomlParser);
        assert_eq!(registry.supported_formats(), vec!["toml", "yml", "json"]);
    }
}
