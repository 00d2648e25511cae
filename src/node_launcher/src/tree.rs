//! Configuration tree model
//!
//! A parsed configuration document is a tree of [`ConfigValue`]s. Mapping
//! keys are always strings and keep their document order, so parameters and
//! remappings come out in the order the author wrote them.

use crate::error::SchemaError;
use indexmap::IndexMap;
use serde::Serialize;

/// Leaf value of the configuration tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

/// Node of the configuration tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Scalar(Scalar),
    Sequence(Vec<ConfigValue>),
    Mapping(ConfigMap),
}

/// String-keyed mapping in document order
pub type ConfigMap = IndexMap<String, ConfigValue>;

impl From<Scalar> for ConfigValue {
    fn from(scalar: Scalar) -> Self {
        ConfigValue::Scalar(scalar)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(map: ConfigMap) -> Self {
        ConfigValue::Mapping(map)
    }
}

/// Join a mapping key onto a `/`-separated key path
pub(crate) fn join_key(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}/{}", parent, key)
    }
}

fn join_index(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.to_string()
    }
}

impl ConfigValue {
    /// Convert a parsed YAML document into a configuration tree
    pub fn from_yaml(value: serde_yaml::Value) -> Result<Self, SchemaError> {
        Self::from_yaml_at(value, "")
    }

    fn from_yaml_at(value: serde_yaml::Value, path: &str) -> Result<Self, SchemaError> {
        use serde_yaml::Value;

        let converted = match value {
            Value::Null => Scalar::Null.into(),
            Value::Bool(b) => Scalar::Bool(b).into(),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Scalar::Integer(i).into(),
                None => n.as_f64().map(Scalar::Float).unwrap_or(Scalar::Null).into(),
            },
            Value::String(s) => Scalar::String(s).into(),
            Value::Sequence(seq) => ConfigValue::Sequence(
                seq.into_iter()
                    .enumerate()
                    .map(|(i, item)| Self::from_yaml_at(item, &join_index(path, i)))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Value::Mapping(mapping) => {
                let mut map = ConfigMap::new();
                for (key, item) in mapping {
                    let Value::String(key) = key else {
                        return Err(SchemaError::NonStringKey {
                            path: display_path(path),
                        });
                    };
                    let child = Self::from_yaml_at(item, &join_key(path, &key))?;
                    map.insert(key, child);
                }
                ConfigValue::Mapping(map)
            }
            Value::Tagged(tagged) => {
                log::debug!(
                    "Dropping YAML tag {} at '{}'",
                    tagged.tag,
                    display_path(path)
                );
                Self::from_yaml_at(tagged.value, path)?
            }
        };
        Ok(converted)
    }

    /// Convert a parsed JSON document into a configuration tree
    pub fn from_json(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Scalar::Null.into(),
            Value::Bool(b) => Scalar::Bool(b).into(),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Scalar::Integer(i).into(),
                None => n.as_f64().map(Scalar::Float).unwrap_or(Scalar::Null).into(),
            },
            Value::String(s) => Scalar::String(s).into(),
            Value::Array(items) => {
                ConfigValue::Sequence(items.into_iter().map(Self::from_json).collect())
            }
            Value::Object(object) => ConfigValue::Mapping(
                object
                    .into_iter()
                    .map(|(k, v)| (k, Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Human-readable kind, used in type mismatch errors
    pub fn kind_name(&self) -> &'static str {
        match self {
            ConfigValue::Scalar(Scalar::Null) => "null",
            ConfigValue::Scalar(Scalar::Bool(_)) => "bool",
            ConfigValue::Scalar(Scalar::Integer(_)) => "integer",
            ConfigValue::Scalar(Scalar::Float(_)) => "float",
            ConfigValue::Scalar(Scalar::String(_)) => "string",
            ConfigValue::Sequence(_) => "sequence",
            ConfigValue::Mapping(_) => "mapping",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Scalar(Scalar::Null))
    }

    fn mismatch(&self, path: &str, expected: &'static str) -> SchemaError {
        SchemaError::TypeMismatch {
            path: display_path(path),
            expected,
            found: self.kind_name(),
        }
    }

    pub fn as_mapping(&self, path: &str) -> Result<&ConfigMap, SchemaError> {
        match self {
            ConfigValue::Mapping(map) => Ok(map),
            other => Err(other.mismatch(path, "mapping")),
        }
    }

    pub fn into_mapping(self, path: &str) -> Result<ConfigMap, SchemaError> {
        match self {
            ConfigValue::Mapping(map) => Ok(map),
            other => Err(other.mismatch(path, "mapping")),
        }
    }

    pub fn as_sequence(&self, path: &str) -> Result<&[ConfigValue], SchemaError> {
        match self {
            ConfigValue::Sequence(items) => Ok(items),
            other => Err(other.mismatch(path, "sequence")),
        }
    }

    pub fn as_str(&self, path: &str) -> Result<&str, SchemaError> {
        match self {
            ConfigValue::Scalar(Scalar::String(s)) => Ok(s),
            other => Err(other.mismatch(path, "string")),
        }
    }

    pub fn as_bool(&self, path: &str) -> Result<bool, SchemaError> {
        match self {
            ConfigValue::Scalar(Scalar::Bool(b)) => Ok(*b),
            other => Err(other.mismatch(path, "bool")),
        }
    }

    /// Numeric accessor; integers widen to floating point
    pub fn as_f64(&self, path: &str) -> Result<f64, SchemaError> {
        match self {
            ConfigValue::Scalar(Scalar::Integer(i)) => Ok(*i as f64),
            ConfigValue::Scalar(Scalar::Float(f)) => Ok(*f),
            other => Err(other.mismatch(path, "number")),
        }
    }
}
