//! Artifact and asset descriptors referenced by nodes

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::extra::ExtraProperties;

/// A file produced or consumed by a node.
///
/// Two artifacts are the same artifact when they share `path` and
/// `platform`; `transform` and extra properties are payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Artifact {
    pub path: String,
    pub transform: Option<String>,
    pub platform: Option<String>,
    pub extra_properties: ExtraProperties,
}

impl Artifact {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn set_all(&mut self, source: &Artifact) {
        if !source.path.is_empty() {
            self.path = source.path.clone();
        }
        if source.transform.is_some() {
            self.transform = source.transform.clone();
        }
        if source.platform.is_some() {
            self.platform = source.platform.clone();
        }
        self.extra_properties.merge(&source.extra_properties);
    }

    pub fn as_value(&self) -> Value {
        let mut props = Map::new();
        props.insert("path".into(), Value::from(self.path.as_str()));
        props.insert("transform".into(), Value::from(self.transform.clone()));
        props.insert("platform".into(), Value::from(self.platform.clone()));
        props.insert(
            "extraProperties".into(),
            self.extra_properties.resolved_value("artifact"),
        );
        Value::Object(props)
    }
}

impl PartialEq for Artifact {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.platform == other.platform
    }
}

impl Eq for Artifact {}

impl Hash for Artifact {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
        self.platform.hash(state);
    }
}

/// Merge an optional nested artifact: set fields flow in, an absent
/// source leaves the target alone.
pub(crate) fn merge_artifact(target: &mut Option<Artifact>, source: &Option<Artifact>) {
    if let Some(source) = source {
        match target {
            Some(existing) => existing.set_all(source),
            None => *target = Some(source.clone()),
        }
    }
}

pub(crate) fn artifacts_value<'a>(artifacts: impl IntoIterator<Item = &'a Artifact>) -> Value {
    Value::Array(artifacts.into_iter().map(Artifact::as_value).collect())
}

/// Remote input fetched by a downloader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Asset {
    pub input: String,
    pub output: Option<String>,
    pub unpack: Option<bool>,
}

impl Asset {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    pub fn as_value(&self) -> Value {
        let mut props = Map::new();
        props.insert("input".into(), Value::from(self.input.as_str()));
        props.insert("output".into(), Value::from(self.output.clone()));
        props.insert("unpack".into(), Value::from(self.unpack.unwrap_or(false)));
        Value::Object(props)
    }
}
