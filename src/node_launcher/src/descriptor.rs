//! Node descriptor construction
//!
//! The configuration document nests namespaces as mapping keys down to a
//! single node entry, the mapping that owns `ros__parameters`:
//!
//! ```yaml
//! robot:            # namespace segment
//!   perception:     # namespace segment
//!     detector:     # node name
//!       ros__parameters:
//!         threshold: 0.5
//!         ros_remappings: { topics: ["image:/camera/image_raw"] }
//!         ros_execution: { node_package: vision, node_executable: detector, output: screen }
//! ```

use crate::{
    error::{Result, StructuralError},
    execution::ExecutionOptions,
    package_index::PackageIndex,
    params::flatten_parameters,
    remap::{RemapPair, RemapSpec},
    tree::{join_key, ConfigMap, ConfigValue},
    uri::resolve_uris,
};
use serde::Serialize;
use std::fmt;

/// Reserved key marking a node entry
pub const NODE_ENTRY_KEY: &str = "ros__parameters";
/// Reserved parameter holding remapping rules
pub const REMAPPINGS_KEY: &str = "ros_remappings";
/// Reserved parameter holding process execution options
pub const EXECUTION_KEY: &str = "ros_execution";

/// Ordered namespace segments, outermost first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Namespace(Vec<String>);

impl Namespace {
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Absolute ROS namespace, `/` for the root namespace
    pub fn as_ros_path(&self) -> String {
        if self.0.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", self.0.join("/"))
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_ros_path())
    }
}

/// Launch-ready description of one node process
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDescriptor {
    namespace: Namespace,
    name: String,
    parameters: ConfigMap,
    remappings: Vec<RemapPair>,
    execution: ExecutionOptions,
}

impl NodeDescriptor {
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameters with reserved keys removed and URIs resolved
    pub fn parameters(&self) -> &ConfigMap {
        &self.parameters
    }

    pub fn remappings(&self) -> &[RemapPair] {
        &self.remappings
    }

    pub fn execution(&self) -> &ExecutionOptions {
        &self.execution
    }

    /// `/<namespace>/<name>`
    pub fn fully_qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            format!("/{}", self.name)
        } else {
            format!("{}/{}", self.namespace.as_ros_path(), self.name)
        }
    }

    /// Parameters as `(dotted.name, value)` pairs
    pub fn flattened_parameters(&self) -> Vec<(String, String)> {
        flatten_parameters(&self.parameters)
    }

    /// Render the parameters as a ROS 2 parameter file for this node
    pub fn to_params_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        let mut node = ConfigMap::new();
        node.insert(NODE_ENTRY_KEY.to_string(), self.parameters.clone().into());
        let mut document = ConfigMap::new();
        document.insert(self.fully_qualified_name(), node.into());
        serde_yaml::to_string(&document)
    }
}

/// A located node entry
struct NodeEntry<'a> {
    namespace: Vec<String>,
    name: &'a str,
    body: &'a ConfigMap,
}

impl NodeEntry<'_> {
    fn path(&self) -> String {
        join_key(&self.namespace.join("/"), self.name)
    }
}

/// Depth-first search for node entries. Descent stops at an entry; any
/// `ros__parameters` key further down is recorded in `nested`.
fn collect_node_entries<'a>(
    map: &'a ConfigMap,
    namespace: &mut Vec<String>,
    entries: &mut Vec<NodeEntry<'a>>,
    nested: &mut Vec<String>,
) {
    for (key, value) in map.iter() {
        let ConfigValue::Mapping(child) = value else {
            continue;
        };

        if child.contains_key(NODE_ENTRY_KEY) {
            let entry = NodeEntry {
                namespace: namespace.clone(),
                name: key.as_str(),
                body: child,
            };
            let entry_path = entry.path();
            for (child_key, child_value) in child.iter() {
                collect_nested_markers(child_value, &join_key(&entry_path, child_key), nested);
            }
            entries.push(entry);
        } else {
            namespace.push(key.to_string());
            collect_node_entries(child, namespace, entries, nested);
            namespace.pop();
        }
    }
}

fn collect_nested_markers(value: &ConfigValue, path: &str, out: &mut Vec<String>) {
    match value {
        ConfigValue::Mapping(map) => {
            for (key, item) in map.iter() {
                let item_path = join_key(path, key);
                if key == NODE_ENTRY_KEY {
                    out.push(item_path.clone());
                }
                collect_nested_markers(item, &item_path, out);
            }
        }
        ConfigValue::Sequence(items) => {
            for (i, item) in items.iter().enumerate() {
                collect_nested_markers(item, &format!("{}[{}]", path, i), out);
            }
        }
        ConfigValue::Scalar(_) => {}
    }
}

fn locate_node_entry(root: &ConfigMap) -> std::result::Result<NodeEntry<'_>, StructuralError> {
    let mut entries = Vec::new();
    let mut nested = Vec::new();
    collect_node_entries(root, &mut Vec::new(), &mut entries, &mut nested);

    if entries.len() == 1 && nested.is_empty() {
        return Ok(entries.remove(0));
    }
    if entries.is_empty() {
        return Err(StructuralError::NodeEntryNotFound);
    }

    let mut paths: Vec<String> = entries
        .iter()
        .map(|entry| join_key(&entry.path(), NODE_ENTRY_KEY))
        .collect();
    paths.extend(nested);
    Err(StructuralError::AmbiguousNodeEntry { paths })
}

/// Build the descriptor for the single node entry in `document`.
///
/// Pure with respect to its inputs: the same document and package index
/// always produce an equal descriptor.
pub fn build_node_descriptor(
    document: &ConfigValue,
    index: &dyn PackageIndex,
) -> Result<NodeDescriptor> {
    let ConfigValue::Mapping(root) = document else {
        return Err(StructuralError::NodeEntryNotFound.into());
    };

    let entry = locate_node_entry(root)?;
    let entry_path = entry.path();
    log::debug!("Found node entry at '{}'", entry_path);

    for key in entry.body.keys().filter(|k| k.as_str() != NODE_ENTRY_KEY) {
        log::warn!("Ignoring '{}' next to {}", join_key(&entry_path, key), NODE_ENTRY_KEY);
    }

    let params_path = join_key(&entry_path, NODE_ENTRY_KEY);
    let mut parameters = entry
        .body
        .get(NODE_ENTRY_KEY)
        .map(|v| v.as_mapping(&params_path))
        .transpose()?
        .cloned()
        .unwrap_or_default();

    let remap_block = parameters.shift_remove(REMAPPINGS_KEY);
    let execution_block = parameters.shift_remove(EXECUTION_KEY);

    for value in parameters.values_mut() {
        resolve_uris(value, index)?;
    }

    let remappings = RemapSpec::from_config(
        remap_block.as_ref(),
        &join_key(&params_path, REMAPPINGS_KEY),
    )?
    .expand()?;

    let execution = ExecutionOptions::from_config(
        execution_block.as_ref(),
        &join_key(&params_path, EXECUTION_KEY),
    )?;

    let descriptor = NodeDescriptor {
        namespace: Namespace::new(entry.namespace),
        name: entry.name.to_string(),
        parameters,
        remappings,
        execution,
    };

    log::info!(
        "Node {} ({}/{}): {} parameters, {} remappings",
        descriptor.fully_qualified_name(),
        descriptor.execution.package,
        descriptor.execution.executable,
        descriptor.parameters.len(),
        descriptor.remappings.len()
    );

    Ok(descriptor)
}
