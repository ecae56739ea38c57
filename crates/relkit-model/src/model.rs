//! Root of a release configuration tree

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::activation::ProjectContext;
use crate::assemble::Assemble;
use crate::download::Download;
use crate::error::Result;
use crate::project::Project;

/// A complete release configuration: project metadata plus every
/// assembler and downloader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ReleaseDocument", rename_all = "camelCase")]
pub struct ReleaseModel {
    pub project: Project,
    pub assemble: Assemble,
    pub download: Download,
}

/// On-disk shape of a [`ReleaseModel`], keeping track of which sections
/// the document spelled out.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ReleaseDocument {
    project: Project,
    assemble: Option<Assemble>,
    download: Option<Download>,
}

impl From<ReleaseDocument> for ReleaseModel {
    fn from(document: ReleaseDocument) -> Self {
        let assemble = document.assemble.map(|mut assemble| {
            assemble.mark_declared();
            assemble
        });
        let download = document.download.map(|mut download| {
            download.mark_declared();
            download
        });
        Self {
            project: document.project,
            assemble: assemble.unwrap_or_default(),
            download: download.unwrap_or_default(),
        }
    }
}

impl ReleaseModel {
    /// Overlay `source` onto this model.
    ///
    /// A section `source` never declared (absent from its document, no
    /// flag, no entries) is skipped, so an override layer that only touches
    /// `project` does not wipe the defaults' assemblers or downloaders. A
    /// declared section replaces each of its sub-maps wholesale, even with
    /// empty ones.
    pub fn set_all(&mut self, source: &ReleaseModel) {
        self.project.set_all(&source.project);
        if !source.assemble.is_unset() {
            self.assemble.set_all(&source.assemble);
        }
        if !source.download.is_unset() {
            self.download.set_all(&source.download);
        }
    }

    /// Name every unnamed node after its map key.
    pub fn normalize_names(&mut self) {
        self.assemble.normalize_names();
        self.download.normalize_names();
    }

    /// Fail when two nodes of one kind end up with the same name.
    ///
    /// Export fails the same way; checking right after a document is read
    /// reports the clash against that document.
    pub fn check_names(&self) -> Result<()> {
        self.assemble.check_names()?;
        self.download.check_names()
    }

    /// Resolve all nodes against `context`; returns the number enabled.
    pub fn resolve_enabled(&mut self, context: &dyn ProjectContext) -> usize {
        self.assemble.resolve_enabled(context) + self.download.resolve_enabled(context)
    }

    pub fn as_map(&self, full: bool) -> Result<Map<String, Value>> {
        let mut map = self.project.as_map();
        map.extend(self.assemble.as_map(full)?);
        map.extend(self.download.as_map(full)?);
        Ok(map)
    }
}
