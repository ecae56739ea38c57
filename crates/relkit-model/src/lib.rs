//! Release configuration model for relkit
//!
//! This crate holds the configuration tree of a release run and the rules
//! that act on it:
//!
//! - **Merge**: `set_all` overlays an override tree onto a default tree.
//!   Scalars flow in only when the override sets them, extra properties
//!   merge additively, and aggregator sub-maps are replaced wholesale.
//! - **Activation**: every node declares an [`Active`] mode that is
//!   evaluated against a [`ProjectContext`]. An undeclared mode means
//!   "never".
//! - **Export**: `as_map` flattens the tree into ordered JSON maps for
//!   templating and dry-run reports, hiding disabled nodes unless the
//!   full view is asked for.
//!
//! # Example
//!
//! ```
//! use relkit_model::{Active, ConfigNode, JlinkAssembler, ReleaseModel, ResolutionEngine, RunContext};
//!
//! let mut defaults = ReleaseModel::default();
//! let mut jlink = JlinkAssembler::named("app");
//! jlink.set_active(Active::Release);
//! defaults.assemble.add_jlink(jlink).unwrap();
//!
//! let mut overrides = ReleaseModel::default();
//! overrides.project.version = Some("1.0.0".into());
//!
//! let engine = ResolutionEngine::new();
//! let (model, report) = engine.evaluate(&defaults, [&overrides], &RunContext::release());
//! assert!(report.is_enabled("jlink:app"));
//!
//! let map = engine.export(&model, false).unwrap();
//! assert_eq!(map["assemble"]["jlink"]["app"]["enabled"], true);
//! ```

pub mod activation;
mod aggregate;
pub mod artifact;
pub mod assemble;
pub mod download;
pub mod engine;
pub mod error;
pub mod extra;
pub mod java;
pub mod model;
pub mod node;
pub mod project;

pub use activation::{Active, ProjectContext, RunContext};
pub use artifact::{Artifact, Asset};
pub use assemble::{
    ArchiveAssembler, ArchiveFormat, Assemble, Assembler, AssemblerCommon, JlinkAssembler,
    NativeImageAssembler,
};
pub use download::{
    Authorization, Download, Downloader, DownloaderCommon, FtpDownloader, HttpDownloader,
    ScpDownloader, SftpDownloader, SshFields,
};
pub use engine::{ResolutionEngine, ResolutionReport};
pub use error::{Error, Result};
pub use extra::ExtraProperties;
pub use java::Java;
pub use model::ReleaseModel;
pub use node::{ConfigNode, NodeCore};
pub use project::{Project, Snapshot};
