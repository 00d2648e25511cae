//! record.json data structures

use serde::{Deserialize, Serialize};

/// Root structure for record.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordJson {
    pub node: Vec<NodeRecord>,
}

impl RecordJson {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Node record structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub executable: String,
    pub package: String,
    pub name: String,
    pub namespace: String,
    pub params: Vec<(String, String)>,
    pub remaps: Vec<(String, String)>,
    pub cmd: Vec<String>,
    pub output: String,
    pub emulate_tty: bool,
    pub respawn: bool,
    pub respawn_delay: f64,
    pub shutdown_on_exit: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn talker_record() -> NodeRecord {
        NodeRecord {
            executable: "talker".to_string(),
            package: "demo_nodes_cpp".to_string(),
            name: "talker".to_string(),
            namespace: "/".to_string(),
            params: vec![("rate".to_string(), "10.0".to_string())],
            remaps: vec![("chatter".to_string(), "/chat".to_string())],
            cmd: vec![
                "/opt/ros/humble/lib/demo_nodes_cpp/talker".to_string(),
                "--ros-args".to_string(),
                "-r".to_string(),
                "__node:=talker".to_string(),
            ],
            output: "screen".to_string(),
            emulate_tty: false,
            respawn: false,
            respawn_delay: 0.0,
            shutdown_on_exit: false,
        }
    }

    #[test]
    fn test_empty_record() {
        let record = RecordJson::new();
        assert!(record.node.is_empty());
        let json = record.to_json().unwrap();
        assert!(json.contains("\"node\""));
    }

    #[test]
    fn test_serialize_node_record() {
        let json = serde_json::to_string(&talker_record()).unwrap();
        assert!(json.contains("\"executable\":\"talker\""));
        assert!(json.contains("\"package\":\"demo_nodes_cpp\""));
        assert!(json.contains("\"output\":\"screen\""));
    }

    #[test]
    fn test_tuple_serialization() {
        let json = serde_json::to_string(&talker_record()).unwrap();
        // Tuples should serialize as arrays
        assert!(json.contains("[\"rate\",\"10.0\"]"));
        assert!(json.contains("[\"chatter\",\"/chat\"]"));
    }

    #[test]
    fn test_record_json_reads_back() {
        let mut record = RecordJson::new();
        record.node.push(talker_record());
        let parsed: RecordJson = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        assert_eq!(parsed.node, vec![talker_record()]);
    }
}
