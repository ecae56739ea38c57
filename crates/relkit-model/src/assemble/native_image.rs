//! `native-image` assembler: GraalVM native executables

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Assembler, AssemblerCommon, assembler_map};
use crate::artifact::{Artifact, merge_artifact};
use crate::error::Result;
use crate::node::{ConfigNode, NodeCore, strings_value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NativeImageAssembler {
    #[serde(flatten)]
    pub common: AssemblerCommon,
    pub image_name: Option<String>,
    pub image_name_transform: Option<String>,
    pub graal: Option<Artifact>,
    pub main_jar: Option<Artifact>,
    pub args: Vec<String>,
}

impl NativeImageAssembler {
    pub const TYPE: &'static str = "native-image";

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            common: AssemblerCommon::named(name),
            ..Self::default()
        }
    }
}

impl ConfigNode for NativeImageAssembler {
    fn node_type(&self) -> &'static str {
        Self::TYPE
    }

    fn prefix(&self) -> &'static str {
        "nativeImage"
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
        merge_artifact(&mut self.graal, &source.graal);
        merge_artifact(&mut self.main_jar, &source.main_jar);
        self.args = source.args.clone();
    }

    fn as_map(&self, full: bool) -> Result<Map<String, Value>> {
        assembler_map(self, full)
    }
}

impl Assembler for NativeImageAssembler {
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
        props.insert(
            "graal".into(),
            self.graal.as_ref().map(Artifact::as_value).unwrap_or(Value::Null),
        );
        props.insert(
            "mainJar".into(),
            self.main_jar
                .as_ref()
                .map(Artifact::as_value)
                .unwrap_or(Value::Null),
        );
        props.insert("args".into(), strings_value(&self.args));
    }
}
