//! Remapping specification and expansion

use crate::{
    error::SchemaError,
    tree::{join_key, ConfigValue},
};
use serde::Serialize;
use std::fmt;

/// Topic-level suffixes of the interfaces behind one ROS 2 action, in the
/// order their remappings are emitted.
pub const ACTION_SUFFIXES: [&str; 5] = [
    "/_action/feedback",
    "/_action/status",
    "/_action/cancel_goal",
    "/_action/get_result",
    "/_action/send_goal",
];

/// A concrete `(from, to)` remapping rule
pub type RemapPair = (String, String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceKind {
    Topic,
    Service,
    Action,
}

impl InterfaceKind {
    /// Name of the `ros_remappings` section holding this kind
    pub fn section(self) -> &'static str {
        match self {
            InterfaceKind::Topic => "topics",
            InterfaceKind::Service => "services",
            InterfaceKind::Action => "actions",
        }
    }
}

impl fmt::Display for InterfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InterfaceKind::Topic => "topic",
            InterfaceKind::Service => "service",
            InterfaceKind::Action => "action",
        };
        f.write_str(name)
    }
}

/// Expand one raw `"from:to"` entry into concrete remap pairs.
///
/// Topics and services map to a single pair. An action maps to one pair per
/// entry of [`ACTION_SUFFIXES`].
pub fn expand_remap(raw: &str, kind: InterfaceKind) -> Result<Vec<RemapPair>, SchemaError> {
    let (from, to) = raw
        .split_once(':')
        .ok_or_else(|| SchemaError::MalformedRemap {
            kind: kind.to_string(),
            raw: raw.to_string(),
        })?;

    let (from, to) = (from.trim(), to.trim());
    if from.is_empty() || to.is_empty() {
        return Err(SchemaError::EmptyRemapSide {
            kind: kind.to_string(),
            raw: raw.to_string(),
        });
    }

    let pairs = match kind {
        InterfaceKind::Topic | InterfaceKind::Service => vec![(from.to_string(), to.to_string())],
        InterfaceKind::Action => ACTION_SUFFIXES
            .iter()
            .map(|suffix| (format!("{}{}", from, suffix), format!("{}{}", to, suffix)))
            .collect(),
    };
    Ok(pairs)
}

/// Raw remapping entries, grouped by interface kind, as written under
/// `ros_remappings`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemapSpec {
    pub topics: Vec<String>,
    pub services: Vec<String>,
    pub actions: Vec<String>,
}

impl RemapSpec {
    /// Read the `ros_remappings` block. A missing or null block is empty.
    pub fn from_config(value: Option<&ConfigValue>, path: &str) -> Result<Self, SchemaError> {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return Ok(Self::default());
        };
        let map = value.as_mapping(path)?;

        for key in map.keys() {
            if !matches!(key.as_str(), "topics" | "services" | "actions") {
                log::warn!("Ignoring unknown remapping section '{}'", join_key(path, key));
            }
        }

        let section = |kind: InterfaceKind| -> Result<Vec<String>, SchemaError> {
            let section_path = join_key(path, kind.section());
            match map.get(kind.section()) {
                None => Ok(Vec::new()),
                Some(v) if v.is_null() => Ok(Vec::new()),
                Some(v) => v
                    .as_sequence(&section_path)?
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        item.as_str(&format!("{}[{}]", section_path, i))
                            .map(str::to_string)
                    })
                    .collect(),
            }
        };

        Ok(Self {
            topics: section(InterfaceKind::Topic)?,
            services: section(InterfaceKind::Service)?,
            actions: section(InterfaceKind::Action)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty() && self.services.is_empty() && self.actions.is_empty()
    }

    /// Expand every entry, topics first, then services, then actions
    pub fn expand(&self) -> Result<Vec<RemapPair>, SchemaError> {
        let groups = [
            (InterfaceKind::Topic, &self.topics),
            (InterfaceKind::Service, &self.services),
            (InterfaceKind::Action, &self.actions),
        ];

        let mut pairs = Vec::new();
        for (kind, entries) in groups {
            for raw in entries {
                pairs.extend(expand_remap(raw, kind)?);
            }
        }
        Ok(pairs)
    }
}
