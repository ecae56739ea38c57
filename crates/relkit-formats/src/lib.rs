//! Configuration document parsers for relkit
//!
//! Turns TOML, YAML and JSON documents into
//! [`ReleaseModel`](relkit_model::ReleaseModel) trees. Parsers are kept in
//! an explicit [`ParserRegistry`] built once by the caller.
//!
//! # Example
//!
//! ```
//! use relkit_formats::ParserRegistry;
//! use relkit_model::{ResolutionEngine, RunContext};
//!
//! let registry = ParserRegistry::with_builtins();
//!
//! let defaults = registry.parser_for_format("toml").unwrap().parse(r#"
//! [download.ftp.mirror]
//! active = "release"
//! host = "ftp.acme.org"
//! "#).unwrap();
//!
//! let overrides = registry.parser_for_format("yml").unwrap().parse(r#"
//! download:
//!   ftp:
//!     mirror:
//!       active: release
//!       host: ftp.eu.acme.org
//! "#).unwrap();
//!
//! let engine = ResolutionEngine::new();
//! let (model, _) = engine.evaluate(&defaults, [&overrides], &RunContext::release());
//! let map = engine.export(&model, false).unwrap();
//! assert_eq!(map["download"]["ftp"]["mirror"]["host"], "ftp.eu.acme.org");
//! ```

pub mod error;
pub mod loader;
pub mod parser;
pub mod registry;

pub use error::{Error, Result};
pub use loader::ConfigLoader;
pub use parser::{ConfigParser, JsonParser, TomlParser, YamlParser};
pub use registry::ParserRegistry;
