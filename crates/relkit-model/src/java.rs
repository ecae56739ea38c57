//! Java coordinates nested under assemblers

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::extra::ExtraProperties;
use crate::node::is_set;

/// Java build coordinates.
///
/// Enabled as soon as any field is set; there is no activation mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Java {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub main_class: Option<String>,
    pub multi_project: Option<bool>,
    pub extra_properties: ExtraProperties,
}

impl Java {
    /// Blank strings do not count as set.
    pub fn is_enabled(&self) -> bool {
        is_set(&self.group_id)
            || is_set(&self.artifact_id)
            || is_set(&self.version)
            || is_set(&self.main_class)
            || self.multi_project.is_some()
            || !self.extra_properties.is_empty()
    }

    pub fn set_all(&mut self, source: &Java) {
        if source.group_id.is_some() {
            self.group_id = source.group_id.clone();
        }
        if source.artifact_id.is_some() {
            self.artifact_id = source.artifact_id.clone();
        }
        if source.version.is_some() {
            self.version = source.version.clone();
        }
        if source.main_class.is_some() {
            self.main_class = source.main_class.clone();
        }
        if source.multi_project.is_some() {
            self.multi_project = source.multi_project;
        }
        self.extra_properties.merge(&source.extra_properties);
    }

    pub fn as_map(&self, _full: bool) -> Map<String, Value> {
        let mut props = Map::new();
        props.insert("version".into(), Value::from(self.version.clone()));
        props.insert("groupId".into(), Value::from(self.group_id.clone()));
        props.insert("artifactId".into(), Value::from(self.artifact_id.clone()));
        props.insert("mainClass".into(), Value::from(self.main_class.clone()));
        props.insert(
            "multiProject".into(),
            Value::from(self.multi_project.unwrap_or(false)),
        );
        props.insert(
            "extraProperties".into(),
            self.extra_properties.resolved_value("java"),
        );
        props
    }
}
