//! Project section of the release model

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::activation::RunContext;
use crate::error::{Error, Result};
use crate::extra::ExtraProperties;

pub const DEFAULT_SNAPSHOT_PATTERN: &str = ".*-SNAPSHOT";

/// Snapshot detection settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    /// Regex the whole version must match to count as a snapshot
    pub pattern: Option<String>,
    pub label: Option<String>,
}

impl Snapshot {
    pub fn effective_pattern(&self) -> &str {
        self.pattern.as_deref().unwrap_or(DEFAULT_SNAPSHOT_PATTERN)
    }

    fn set_all(&mut self, source: &Snapshot) {
        if source.pattern.is_some() {
            self.pattern = source.pattern.clone();
        }
        if source.label.is_some() {
            self.label = source.label.clone();
        }
    }
}

/// Project metadata, also the default source of activation context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub name: Option<String>,
    pub version: Option<String>,
    pub snapshot: Snapshot,
    /// Explicit prerelease flag; inferred from the version when unset
    pub prerelease: Option<bool>,
    pub extra_properties: ExtraProperties,
}

impl Project {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            version: Some(version.into()),
            ..Self::default()
        }
    }

    pub fn set_all(&mut self, source: &Project) {
        if source.name.is_some() {
            self.name = source.name.clone();
        }
        if source.version.is_some() {
            self.version = source.version.clone();
        }
        self.snapshot.set_all(&source.snapshot);
        if source.prerelease.is_some() {
            self.prerelease = source.prerelease;
        }
        self.extra_properties.merge(&source.extra_properties);
    }

    /// Whether the version matches the snapshot pattern.
    ///
    /// A project without a version is a snapshot.
    pub fn is_snapshot(&self) -> Result<bool> {
        let Some(version) = self.version.as_deref() else {
            return Ok(true);
        };
        let pattern = self.snapshot.effective_pattern();
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
            Error::InvalidSnapshotPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(regex.is_match(version))
    }

    /// Explicit flag first, then a semver pre-release component on a
    /// non-snapshot version.
    pub fn is_prerelease(&self) -> Result<bool> {
        if let Some(prerelease) = self.prerelease {
            return Ok(prerelease);
        }
        if self.is_snapshot()? {
            return Ok(false);
        }
        Ok(self
            .version
            .as_deref()
            .and_then(|v| semver::Version::parse(v).ok())
            .is_some_and(|v| !v.pre.is_empty()))
    }

    /// Activation context derived from this project.
    pub fn context(&self) -> Result<RunContext> {
        Ok(RunContext {
            snapshot: self.is_snapshot()?,
            prerelease: self.is_prerelease()?,
        })
    }

    pub fn as_map(&self) -> Map<String, Value> {
        let mut snapshot = Map::new();
        snapshot.insert(
            "pattern".into(),
            Value::from(self.snapshot.effective_pattern()),
        );
        snapshot.insert("label".into(), Value::from(self.snapshot.label.clone()));

        let mut props = Map::new();
        props.insert("name".into(), Value::from(self.name.clone()));
        props.insert("version".into(), Value::from(self.version.clone()));
        props.insert("snapshot".into(), Value::Object(snapshot));
        props.insert("prerelease".into(), Value::from(self.prerelease));
        props.insert(
            "extraProperties".into(),
            self.extra_properties.resolved_value("project"),
        );

        let mut map = Map::new();
        map.insert("project".into(), Value::Object(props));
        map
    }
}
