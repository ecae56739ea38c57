//! `jlink` assembler: custom Java runtime images

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Assembler, AssemblerCommon, assembler_map};
use crate::artifact::{Artifact, artifacts_value, merge_artifact};
use crate::error::Result;
use crate::node::{ConfigNode, NodeCore, strings_value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JlinkAssembler {
    #[serde(flatten)]
    pub common: AssemblerCommon,
    pub image_name: Option<String>,
    pub image_name_transform: Option<String>,
    pub module_names: IndexSet<String>,
    pub args: Vec<String>,
    pub jdk: Option<Artifact>,
    pub target_jdks: IndexSet<Artifact>,
    pub copy_jars: Option<bool>,
}

impl JlinkAssembler {
    pub const TYPE: &'static str = "jlink";

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            common: AssemblerCommon::named(name),
            ..Self::default()
        }
    }

    pub fn add_target_jdk(&mut self, jdk: Artifact) -> bool {
        self.target_jdks.insert(jdk)
    }
}

impl ConfigNode for JlinkAssembler {
    fn node_type(&self) -> &'static str {
        Self::TYPE
    }

    fn core(&self) -> &NodeCore {
        &self.common.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.common.core
    }

    fn set_all(&mut self, source: &Self) {
        self.common.merge_from(&source.common);
        if source.image_name.is_some() {
            self.image_name = source.image_name.clone();
        }
        if source.image_name_transform.is_some() {
            self.image_name_transform = source.image_name_transform.clone();
        }
        self.module_names = source.module_names.clone();
        self.args = source.args.clone();
        merge_artifact(&mut self.jdk, &source.jdk);
        self.target_jdks = source.target_jdks.clone();
        if source.copy_jars.is_some() {
            self.copy_jars = source.copy_jars;
        }
    }

    fn as_map(&self, full: bool) -> Result<Map<String, Value>> {
        assembler_map(self, full)
    }
}

impl Assembler for JlinkAssembler {
    fn common(&self) -> &AssemblerCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut AssemblerCommon {
        &mut self.common
    }

    fn section(&self, _full: bool, props: &mut Map<String, Value>) {
        props.insert("imageName".into(), Value::from(self.image_name.clone()));
        props.insert(
            "imageNameTransform".into(),
            Value::from(self.image_name_transform.clone()),
        );
        props.insert("moduleNames".into(), strings_value(&self.module_names));
        props.insert("args".into(), strings_value(&self.args));
        props.insert(
            "jdk".into(),
            self.jdk.as_ref().map(Artifact::as_value).unwrap_or(Value::Null),
        );
        props.insert("targetJdks".into(), artifacts_value(&self.target_jdks));
        props.insert("copyJars".into(), Value::from(self.copy_jars.unwrap_or(true)));
    }
}
