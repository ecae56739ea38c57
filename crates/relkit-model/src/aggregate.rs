//! Helpers shared by container nodes holding named sub-maps of nodes
//!
//! A sub-map is replaced wholesale on merge, never merged per entry.

use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};

use crate::activation::ProjectContext;
use crate::error::{Error, Result};
use crate::node::ConfigNode;

/// Clear `target` and copy every entry of `source` in order.
pub(crate) fn replace_all<N: ConfigNode>(
    target: &mut IndexMap<String, N>,
    source: &IndexMap<String, N>,
) {
    target.clear();
    target.extend(source.iter().map(|(k, v)| (k.clone(), v.clone())));
}

/// Add a node under its own name, refusing to overwrite a sibling.
pub(crate) fn insert_unique<N: ConfigNode>(
    section: &str,
    target: &mut IndexMap<String, N>,
    node: N,
) -> Result<()> {
    let name = node.name().to_string();
    if name.trim().is_empty() {
        return Err(Error::MissingName {
            node_type: node.node_type(),
        });
    }
    if target.contains_key(&name) {
        return Err(Error::duplicate(section, name));
    }
    target.insert(name, node);
    Ok(())
}

/// Give every unnamed entry its map key as name.
pub(crate) fn normalize_names<N: ConfigNode>(nodes: &mut IndexMap<String, N>) {
    for (key, node) in nodes.iter_mut() {
        if node.name().is_empty() {
            node.set_name(key);
        }
    }
}

/// Fail on the first two entries that carry the same node name.
///
/// Map keys are unique, but an explicit `name` may repeat a sibling's key.
pub(crate) fn check_unique_names<N: ConfigNode>(
    section: &str,
    nodes: &IndexMap<String, N>,
) -> Result<()> {
    let mut seen = IndexSet::with_capacity(nodes.len());
    for node in nodes.values() {
        if !seen.insert(node.name()) {
            return Err(Error::duplicate(section, node.name()));
        }
    }
    Ok(())
}

pub(crate) fn resolve_all<N: ConfigNode>(
    nodes: &mut IndexMap<String, N>,
    context: &dyn ProjectContext,
) -> usize {
    nodes
        .values_mut()
        .map(|node| node.resolve_enabled(context))
        .filter(|enabled| *enabled)
        .count()
}

/// Export a sub-map as one ordered object keyed by node name.
///
/// Two entries exporting under the same name is an error rather than a
/// silent overwrite.
pub(crate) fn export_section<N: ConfigNode>(
    section: &str,
    nodes: &IndexMap<String, N>,
    full: bool,
) -> Result<Map<String, Value>> {
    let mut out = Map::new();
    for node in nodes.values() {
        for (name, props) in node.as_map(full)? {
            if out.contains_key(&name) {
                return Err(Error::duplicate(section, name));
            }
            out.insert(name, props);
        }
    }
    Ok(out)
}

/// Put a section under `key` only when it has something to show.
pub(crate) fn put_section<N: ConfigNode>(
    props: &mut Map<String, Value>,
    key: &str,
    nodes: &IndexMap<String, N>,
    full: bool,
) -> Result<()> {
    let section = export_section(key, nodes, full)?;
    if !section.is_empty() {
        props.insert(key.to_string(), Value::Object(section));
    }
    Ok(())
}
