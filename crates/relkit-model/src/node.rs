//! The merge/activation/export contract shared by every configuration node
//!
//! Concrete node types compose a [`NodeCore`] instead of inheriting from a
//! base type. Each type's `set_all` first folds the shared fields through
//! [`NodeCore::merge_from`] and then its own.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::activation::{Active, ProjectContext};
use crate::error::{Error, Result};
use crate::extra::ExtraProperties;

/// Placeholder exported for a secret that is set.
pub const HIDE: &str = "************";

/// Placeholder exported for a secret that is not set.
pub const UNSET: &str = "[unset]";

/// Identity and activation state common to all nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeCore {
    pub name: String,
    pub active: Option<Active>,
    /// `None` until the first activation resolution
    #[serde(skip)]
    pub enabled: Option<bool>,
    pub extra_properties: ExtraProperties,
}

impl NodeCore {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Fold `source` into `self`.
    ///
    /// The activation mode and name only flow in when set on `source`; the
    /// enabled flag is copied as-is.
    pub fn merge_from(&mut self, source: &NodeCore) {
        if source.active.is_some() {
            self.active = source.active;
        }
        self.enabled = source.enabled;
        if !source.name.is_empty() {
            self.name = source.name.clone();
        }
        self.extra_properties.merge(&source.extra_properties);
    }

    /// Unresolved counts as disabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }

    pub fn is_resolved(&self) -> bool {
        self.enabled.is_some()
    }

    pub fn resolve_enabled(&mut self, context: &dyn ProjectContext) -> bool {
        let active = *self.active.get_or_insert(Active::Never);
        let enabled = active.check(context);
        self.enabled = Some(enabled);
        enabled
    }

    pub fn disable(&mut self) {
        self.active = Some(Active::Never);
        self.enabled = Some(false);
    }

    /// Leading `enabled` and `active` export keys.
    pub(crate) fn export_activation(&self, props: &mut Map<String, Value>) {
        props.insert("enabled".into(), Value::Bool(self.is_enabled()));
        props.insert(
            "active".into(),
            self.active
                .map(|a| Value::from(a.as_str()))
                .unwrap_or(Value::Null),
        );
    }

    /// Wrap a finished property map under this node's name.
    pub(crate) fn wrap(
        &self,
        node_type: &'static str,
        props: Map<String, Value>,
    ) -> Result<Map<String, Value>> {
        if self.name.trim().is_empty() {
            return Err(Error::MissingName { node_type });
        }
        let mut map = Map::new();
        map.insert(self.name.clone(), Value::Object(props));
        Ok(map)
    }
}

/// A named, activatable, mergeable, exportable configuration node.
pub trait ConfigNode: Clone {
    /// Immutable variant tag.
    fn node_type(&self) -> &'static str;

    fn core(&self) -> &NodeCore;

    fn core_mut(&mut self) -> &mut NodeCore;

    /// Copy every mutable field of `source` onto `self`. Idempotent.
    fn set_all(&mut self, source: &Self);

    /// Export under the node's name, or an empty map when the node is
    /// disabled and `full` is false.
    fn as_map(&self, full: bool) -> Result<Map<String, Value>>;

    /// Namespace applied to exported extra properties.
    fn prefix(&self) -> &'static str {
        self.node_type()
    }

    fn name(&self) -> &str {
        &self.core().name
    }

    /// Rename the node.
    ///
    /// Meant for building a node before it is added to a section. A node
    /// already stored in a section map keeps its old map key.
    fn set_name(&mut self, name: &str) {
        self.core_mut().name = name.to_string();
    }

    fn active(&self) -> Option<Active> {
        self.core().active
    }

    fn set_active(&mut self, active: Active) {
        self.core_mut().active = Some(active);
    }

    fn is_enabled(&self) -> bool {
        self.core().is_enabled()
    }

    fn extra_properties(&self) -> &ExtraProperties {
        &self.core().extra_properties
    }

    fn resolve_enabled(&mut self, context: &dyn ProjectContext) -> bool {
        let enabled = self.core_mut().resolve_enabled(context);
        tracing::trace!(
            node_type = self.node_type(),
            name = self.name(),
            enabled,
            "Resolved activation"
        );
        enabled
    }

    fn disable(&mut self) {
        self.core_mut().disable();
    }
}

/// A string counts as set only when it holds something besides whitespace.
pub(crate) fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Export a secret without leaking it.
pub(crate) fn secret(value: &Option<String>) -> Value {
    if is_set(value) {
        Value::from(HIDE)
    } else {
        Value::from(UNSET)
    }
}

pub(crate) fn strings_value<'a>(values: impl IntoIterator<Item = &'a String>) -> Value {
    Value::Array(values.into_iter().map(|v| Value::from(v.as_str())).collect())
}
