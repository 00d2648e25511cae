//! Configuration document loading and parameter flattening

use crate::{
    error::{LaunchError, Result},
    tree::{ConfigMap, ConfigValue, Scalar},
};
use std::{fs, path::Path};

/// Load a node configuration document.
///
/// Files ending in `.json` are read as JSON, everything else as YAML. The
/// top level must be a non-empty mapping.
pub fn load_config_document(path: &Path) -> Result<ConfigValue> {
    let content = fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let document = if is_json {
        ConfigValue::from_json(serde_json::from_str(&content)?)
    } else {
        ConfigValue::from_yaml(serde_yaml::from_str(&content)?)?
    };

    let unsupported = |reason: &str| LaunchError::UnsupportedDocument {
        file: path.display().to_string(),
        reason: reason.to_string(),
    };

    match &document {
        ConfigValue::Mapping(map) if map.is_empty() => Err(unsupported("document is empty")),
        ConfigValue::Mapping(_) => {
            log::debug!("Loaded configuration document {}", path.display());
            Ok(document)
        }
        ConfigValue::Scalar(Scalar::Null) => Err(unsupported("document is empty")),
        other => Err(unsupported(&format!(
            "expected a mapping at the top level, found {}",
            other.kind_name()
        ))),
    }
}

/// Flatten nested parameter maps into `(dotted.name, value)` pairs in
/// document order.
pub fn flatten_parameters(map: &ConfigMap) -> Vec<(String, String)> {
    let mut params = Vec::new();
    flatten_into("", map, &mut params);
    params
}

fn flatten_into(prefix: &str, map: &ConfigMap, output: &mut Vec<(String, String)>) {
    for (key, value) in map.iter() {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            ConfigValue::Mapping(nested) => flatten_into(&full_key, nested, output),
            ConfigValue::Sequence(_) => output.push((full_key, flow_value(value))),
            ConfigValue::Scalar(scalar) => output.push((full_key, scalar_to_string(scalar))),
        }
    }
}

/// Render a value as a YAML flow node, which is what ROS parses after `:=`
fn flow_value(value: &ConfigValue) -> String {
    match value {
        ConfigValue::Scalar(Scalar::String(s)) => serde_json::Value::from(s.as_str()).to_string(),
        ConfigValue::Scalar(scalar) => scalar_to_string(scalar),
        ConfigValue::Sequence(items) => {
            let items: Vec<String> = items.iter().map(flow_value).collect();
            format!("[{}]", items.join(","))
        }
        ConfigValue::Mapping(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| {
                    format!(
                        "{}:{}",
                        serde_json::Value::from(k.as_str()),
                        flow_value(v)
                    )
                })
                .collect();
            format!("{{{}}}", entries.join(","))
        }
    }
}

fn scalar_to_string(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Null => "null".to_string(),
        Scalar::Bool(b) => b.to_string(),
        Scalar::Integer(i) => i.to_string(),
        Scalar::Float(f) => format_float(*f),
        Scalar::String(s) => s.clone(),
    }
}

/// Floats keep a decimal point so ROS does not re-type them as integers
fn format_float(f: f64) -> String {
    if f.is_nan() {
        ".nan".to_string()
    } else if f == f64::INFINITY {
        ".inf".to_string()
    } else if f == f64::NEG_INFINITY {
        "-.inf".to_string()
    } else {
        format!("{:?}", f)
    }
}
