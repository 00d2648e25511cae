//! node_launcher library
//!
//! Translates a hierarchical ROS 2 node configuration document into launch
//! instructions for one process: namespace, node name, parameters,
//! remappings and execution options.

pub mod descriptor;
pub mod error;
pub mod execution;
pub mod launch;
pub mod package_index;
pub mod params;
pub mod record;
pub mod remap;
pub mod tree;
pub mod uri;

pub use descriptor::{build_node_descriptor, Namespace, NodeDescriptor};
pub use error::{LaunchError, ResolutionError, Result, SchemaError, StructuralError};
pub use execution::{ExecutionOptions, OutputMode};
pub use launch::{LaunchAdapter, LaunchRequest};
pub use package_index::{AmentIndex, PackageIndex, StaticPackageIndex};
pub use remap::{expand_remap, InterfaceKind, RemapPair, RemapSpec};
pub use tree::{ConfigMap, ConfigValue, Scalar};
pub use uri::{resolve_uri, resolve_uris};

use std::path::Path;

/// Load a configuration file and build its node descriptor
pub fn build_node_descriptor_from_file(
    path: &Path,
    index: &dyn PackageIndex,
) -> Result<NodeDescriptor> {
    log::info!("Loading node configuration: {}", path.display());
    let document = params::load_config_document(path)?;
    build_node_descriptor(&document, index)
}
