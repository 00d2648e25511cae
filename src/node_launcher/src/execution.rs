//! Process execution options read from the `ros_execution` block

use crate::{
    error::SchemaError,
    tree::{join_key, ConfigMap, ConfigValue},
};
use serde::Serialize;
use std::{fmt, str::FromStr};

const NODE_PACKAGE: &str = "node_package";
const NODE_EXECUTABLE: &str = "node_executable";
const OUTPUT: &str = "output";
const EMULATE_TTY: &str = "emulate_tty";
const RESPAWN: &str = "respawn";
const RESPAWN_DELAY: &str = "respawn_delay";
const SHUTDOWN_ON_EXIT: &str = "on_node_exit_shutdown_system";

const KNOWN_KEYS: [&str; 7] = [
    NODE_PACKAGE,
    NODE_EXECUTABLE,
    OUTPUT,
    EMULATE_TTY,
    RESPAWN,
    RESPAWN_DELAY,
    SHUTDOWN_ON_EXIT,
];

/// Where the launched process writes stdout/stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    Screen,
    Log,
    Both,
    OwnLog,
    Full,
}

impl OutputMode {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputMode::Screen => "screen",
            OutputMode::Log => "log",
            OutputMode::Both => "both",
            OutputMode::OwnLog => "own_log",
            OutputMode::Full => "full",
        }
    }
}

impl FromStr for OutputMode {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "screen" => Ok(OutputMode::Screen),
            "log" => Ok(OutputMode::Log),
            "both" => Ok(OutputMode::Both),
            "own_log" => Ok(OutputMode::OwnLog),
            "full" => Ok(OutputMode::Full),
            other => Err(SchemaError::InvalidOutputMode {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionOptions {
    pub package: String,
    pub executable: String,
    pub output: OutputMode,
    pub emulate_tty: bool,
    pub respawn: bool,
    /// Seconds to wait before respawning
    pub respawn_delay: f64,
    pub shutdown_on_exit: bool,
}

impl ExecutionOptions {
    /// Read the `ros_execution` block.
    ///
    /// `node_package`, `node_executable` and `output` are required; an absent
    /// block therefore fails on `node_package`. The flags default to `false`
    /// and `respawn_delay` to `0.0`.
    pub fn from_config(value: Option<&ConfigValue>, path: &str) -> Result<Self, SchemaError> {
        let empty = ConfigMap::new();
        let map = match value {
            None => &empty,
            Some(v) if v.is_null() => &empty,
            Some(v) => v.as_mapping(path)?,
        };

        for key in map.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                log::warn!("Ignoring unknown execution option '{}'", join_key(path, key));
            }
        }

        let package = required_str(map, path, NODE_PACKAGE)?;
        let executable = required_str(map, path, NODE_EXECUTABLE)?;
        let output = required_str(map, path, OUTPUT)?.parse::<OutputMode>()?;

        let respawn_delay = match present(map, RESPAWN_DELAY) {
            Some(v) => v.as_f64(&join_key(path, RESPAWN_DELAY))?,
            None => 0.0,
        };

        Ok(Self {
            package,
            executable,
            output,
            emulate_tty: optional_flag(map, path, EMULATE_TTY)?,
            respawn: optional_flag(map, path, RESPAWN)?,
            respawn_delay,
            shutdown_on_exit: optional_flag(map, path, SHUTDOWN_ON_EXIT)?,
        })
    }
}

/// Entry under `key`, treating null as absent
fn present<'a>(map: &'a ConfigMap, key: &str) -> Option<&'a ConfigValue> {
    map.get(key).filter(|v| !v.is_null())
}

fn required_str(map: &ConfigMap, path: &str, field: &'static str) -> Result<String, SchemaError> {
    let value = present(map, field)
        .ok_or(SchemaError::MissingExecutionOption { field })?
        .as_str(&join_key(path, field))?;

    if value.is_empty() {
        return Err(SchemaError::MissingExecutionOption { field });
    }
    Ok(value.to_string())
}

fn optional_flag(map: &ConfigMap, path: &str, field: &str) -> Result<bool, SchemaError> {
    match present(map, field) {
        Some(v) => v.as_bool(&join_key(path, field)),
        None => Ok(false),
    }
}
