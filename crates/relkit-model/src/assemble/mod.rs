//! Assemblers and the `assemble` section that groups them

mod archive;
mod jlink;
mod native_image;

pub use archive::{ArchiveAssembler, ArchiveFormat};
pub use jlink::JlinkAssembler;
pub use native_image::NativeImageAssembler;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::activation::ProjectContext;
use crate::aggregate;
use crate::artifact::{Artifact, artifacts_value};
use crate::error::Result;
use crate::java::Java;
use crate::node::{ConfigNode, NodeCore};

/// Fields every assembler carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssemblerCommon {
    #[serde(flatten)]
    pub core: NodeCore,
    pub executable: Option<String>,
    pub template_directory: Option<String>,
    pub outputs: IndexSet<Artifact>,
    pub java: Java,
}

impl AssemblerCommon {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            core: NodeCore::named(name),
            ..Self::default()
        }
    }

    /// Outputs are replaced wholesale in `source` order; Java is merged
    /// field by field.
    pub fn merge_from(&mut self, source: &AssemblerCommon) {
        self.core.merge_from(&source.core);
        if source.executable.is_some() {
            self.executable = source.executable.clone();
        }
        if source.template_directory.is_some() {
            self.template_directory = source.template_directory.clone();
        }
        self.outputs.clear();
        self.outputs.extend(source.outputs.iter().cloned());
        self.java.set_all(&source.java);
    }
}

/// An assembler: a node producing release outputs from build artifacts.
pub trait Assembler: ConfigNode {
    fn common(&self) -> &AssemblerCommon;

    fn common_mut(&mut self) -> &mut AssemblerCommon;

    /// Variant-specific export keys.
    fn section(&self, full: bool, props: &mut Map<String, Value>);

    fn outputs(&self) -> &IndexSet<Artifact> {
        &self.common().outputs
    }

    /// Returns false when an equal artifact is already present.
    fn add_output(&mut self, artifact: Artifact) -> bool {
        self.common_mut().outputs.insert(artifact)
    }

    fn java(&self) -> &Java {
        &self.common().java
    }
}

/// Shared export layout for all assemblers.
pub(crate) fn assembler_map<A: Assembler>(
    assembler: &A,
    full: bool,
) -> Result<Map<String, Value>> {
    let common = assembler.common();
    if !full && !common.core.is_enabled() {
        return Ok(Map::new());
    }

    let mut props = Map::new();
    common.core.export_activation(&mut props);
    props.insert("executable".into(), Value::from(common.executable.clone()));
    props.insert(
        "templateDirectory".into(),
        Value::from(common.template_directory.clone()),
    );
    props.insert("outputs".into(), artifacts_value(&common.outputs));
    assembler.section(full, &mut props);
    props.insert(
        "extraProperties".into(),
        common.core.extra_properties.resolved_value(assembler.prefix()),
    );
    if common.java.is_enabled() {
        props.insert("java".into(), Value::Object(common.java.as_map(full)));
    }

    common.core.wrap(assembler.node_type(), props)
}

/// The `assemble` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Assemble {
    pub enabled: Option<bool>,
    pub jlink: IndexMap<String, JlinkAssembler>,
    pub native_image: IndexMap<String, NativeImageAssembler>,
    pub archive: IndexMap<String, ArchiveAssembler>,
    /// The section appeared in a parsed document, possibly empty.
    #[serde(skip)]
    declared: bool,
}

impl Assemble {
    pub fn set_all(&mut self, source: &Assemble) {
        self.enabled = source.enabled;
        self.declared |= source.declared;
        self.set_jlink(&source.jlink);
        self.set_native_image(&source.native_image);
        self.set_archive(&source.archive);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }

    pub fn is_enabled_set(&self) -> bool {
        self.enabled.is_some()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = Some(enabled);
    }

    pub fn is_empty(&self) -> bool {
        self.jlink.is_empty() && self.native_image.is_empty() && self.archive.is_empty()
    }

    /// Nothing declared at all: not present in a document, no flag and no
    /// entries.
    pub fn is_unset(&self) -> bool {
        !self.declared && !self.is_enabled_set() && self.is_empty()
    }

    pub fn is_declared(&self) -> bool {
        self.declared
    }

    /// Mark the section as present in a document even when it is empty,
    /// so that it still replaces the sub-maps it overlays.
    pub fn mark_declared(&mut self) {
        self.declared = true;
    }

    pub fn set_jlink(&mut self, jlink: &IndexMap<String, JlinkAssembler>) {
        aggregate::replace_all(&mut self.jlink, jlink);
    }

    pub fn set_native_image(&mut self, native_image: &IndexMap<String, NativeImageAssembler>) {
        aggregate::replace_all(&mut self.native_image, native_image);
    }

    pub fn set_archive(&mut self, archive: &IndexMap<String, ArchiveAssembler>) {
        aggregate::replace_all(&mut self.archive, archive);
    }

    pub fn add_jlink(&mut self, assembler: JlinkAssembler) -> Result<()> {
        aggregate::insert_unique("jlink", &mut self.jlink, assembler)
    }

    pub fn add_native_image(&mut self, assembler: NativeImageAssembler) -> Result<()> {
        aggregate::insert_unique("nativeImage", &mut self.native_image, assembler)
    }

    pub fn add_archive(&mut self, assembler: ArchiveAssembler) -> Result<()> {
        aggregate::insert_unique("archive", &mut self.archive, assembler)
    }

    pub fn normalize_names(&mut self) {
        aggregate::normalize_names(&mut self.jlink);
        aggregate::normalize_names(&mut self.native_image);
        aggregate::normalize_names(&mut self.archive);
    }

    /// Reject two assemblers of one kind sharing a name.
    pub fn check_names(&self) -> Result<()> {
        aggregate::check_unique_names("jlink", &self.jlink)?;
        aggregate::check_unique_names("nativeImage", &self.native_image)?;
        aggregate::check_unique_names("archive", &self.archive)
    }

    /// Resolve every assembler independently and return how many ended
    /// up enabled.
    pub fn resolve_enabled(&mut self, context: &dyn ProjectContext) -> usize {
        aggregate::resolve_all(&mut self.jlink, context)
            + aggregate::resolve_all(&mut self.native_image, context)
            + aggregate::resolve_all(&mut self.archive, context)
    }

    /// Settle an unset flag from whether any assembler is declared.
    pub fn settle_enabled(&mut self) -> bool {
        let has_entries = !self.is_empty();
        *self.enabled.get_or_insert(has_entries)
    }

    pub fn as_map(&self, full: bool) -> Result<Map<String, Value>> {
        if !full && !self.is_enabled() {
            return Ok(Map::new());
        }

        let mut props = Map::new();
        props.insert("enabled".into(), Value::Bool(self.is_enabled()));
        aggregate::put_section(&mut props, "jlink", &self.jlink, full)?;
        aggregate::put_section(&mut props, "nativeImage", &self.native_image, full)?;
        aggregate::put_section(&mut props, "archive", &self.archive, full)?;

        let mut map = Map::new();
        map.insert("assemble".into(), Value::Object(props));
        Ok(map)
    }
}
