//! Command-line and record generation

use crate::{
    error::ResolutionError,
    launch::{LaunchAdapter, LaunchRequest},
    package_index::PackageIndex,
    params::flatten_parameters,
    record::types::{NodeRecord, RecordJson},
};
use std::path::PathBuf;

pub struct CommandGenerator;

impl CommandGenerator {
    pub fn generate_node_record(
        request: &LaunchRequest<'_>,
        index: &dyn PackageIndex,
    ) -> Result<NodeRecord, ResolutionError> {
        let cmd = Self::generate_node_command(request, index)?;

        Ok(NodeRecord {
            executable: request.executable.to_string(),
            package: request.package.to_string(),
            name: request.node_name.to_string(),
            namespace: request.namespace.as_ros_path(),
            params: flatten_parameters(request.parameters),
            remaps: request.remappings.to_vec(),
            cmd,
            output: request.output.to_string(),
            emulate_tty: request.emulate_tty,
            respawn: request.respawn,
            respawn_delay: request.respawn_delay,
            shutdown_on_exit: request.shutdown_on_exit,
        })
    }

    pub fn generate_node_command(
        request: &LaunchRequest<'_>,
        index: &dyn PackageIndex,
    ) -> Result<Vec<String>, ResolutionError> {
        let mut cmd = Vec::new();

        // 1. Executable path
        let exec_path = Self::resolve_executable_path(request.package, request.executable, index)?;
        cmd.push(exec_path.to_string_lossy().into_owned());

        // 2. ROS args delimiter
        cmd.push("--ros-args".to_string());

        // 3. Node name
        cmd.push("-r".to_string());
        cmd.push(format!("__node:={}", request.node_name));

        // 4. Namespace
        cmd.push("-r".to_string());
        cmd.push(format!("__ns:={}", request.namespace.as_ros_path()));

        // 5. Remappings
        for (from, to) in request.remappings {
            cmd.push("-r".to_string());
            cmd.push(format!("{}:={}", from, to));
        }

        // 6. Parameters
        for (name, value) in flatten_parameters(request.parameters) {
            cmd.push("-p".to_string());
            cmd.push(format!("{}:={}", name, value));
        }

        Ok(cmd)
    }

    /// `<prefix>/lib/<package>/<executable>`
    fn resolve_executable_path(
        package: &str,
        executable: &str,
        index: &dyn PackageIndex,
    ) -> Result<PathBuf, ResolutionError> {
        Ok(index
            .package_prefix(package)?
            .join("lib")
            .join(package)
            .join(executable))
    }
}

/// Launch adapter that records launch requests instead of spawning them
pub struct RecordWriter<'a> {
    index: &'a dyn PackageIndex,
    record: RecordJson,
}

impl<'a> RecordWriter<'a> {
    pub fn new(index: &'a dyn PackageIndex) -> Self {
        Self {
            index,
            record: RecordJson::new(),
        }
    }

    pub fn into_record_json(self) -> RecordJson {
        self.record
    }
}

impl LaunchAdapter for RecordWriter<'_> {
    type Error = ResolutionError;

    fn launch(&mut self, request: LaunchRequest<'_>) -> Result<(), Self::Error> {
        let record = CommandGenerator::generate_node_record(&request, self.index)?;
        log::debug!("Recorded command: {}", record.cmd.join(" "));
        self.record.node.push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_node_descriptor, package_index::StaticPackageIndex, tree::ConfigValue};

    fn descriptor(yaml: &str, index: &StaticPackageIndex) -> crate::NodeDescriptor {
        let document = ConfigValue::from_yaml(serde_yaml::from_str(yaml).unwrap()).unwrap();
        build_node_descriptor(&document, index).unwrap()
    }

    const TALKER: &str = r#"
demo:
  talker:
    ros__parameters:
      rate: 10.0
      qos:
        depth: 5
      ros_remappings:
        topics: ["chatter:/demo/chat"]
      ros_execution:
        node_package: demo_nodes_cpp
        node_executable: talker
        output: screen
"#;

    #[test]
    fn test_generate_node_command() {
        let index = StaticPackageIndex::new().with_package("demo_nodes_cpp", "/opt/ros/humble");
        let descriptor = descriptor(TALKER, &index);

        let cmd = CommandGenerator::generate_node_command(&descriptor.launch_request(), &index)
            .unwrap();
        assert_eq!(
            cmd,
            vec![
                "/opt/ros/humble/lib/demo_nodes_cpp/talker",
                "--ros-args",
                "-r",
                "__node:=talker",
                "-r",
                "__ns:=/demo",
                "-r",
                "chatter:=/demo/chat",
                "-p",
                "rate:=10.0",
                "-p",
                "qos.depth:=5",
            ]
        );
    }

    #[test]
    fn test_record_writer_collects_records() {
        let index = StaticPackageIndex::new().with_package("demo_nodes_cpp", "/opt/ros/humble");
        let descriptor = descriptor(TALKER, &index);

        let mut writer = RecordWriter::new(&index);
        descriptor.launch_with(&mut writer).unwrap();
        let record = writer.into_record_json();

        assert_eq!(record.node.len(), 1);
        let node = &record.node[0];
        assert_eq!(node.package, "demo_nodes_cpp");
        assert_eq!(node.namespace, "/demo");
        assert_eq!(node.output, "screen");
        assert_eq!(
            node.params,
            vec![
                ("rate".to_string(), "10.0".to_string()),
                ("qos.depth".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_unknown_executable_package() {
        let index = StaticPackageIndex::new();
        let descriptor = descriptor(TALKER, &index);

        let mut writer = RecordWriter::new(&index);
        let err = descriptor.launch_with(&mut writer).unwrap_err();
        assert_eq!(
            err,
            ResolutionError::PackageNotFound {
                package: "demo_nodes_cpp".to_string()
            }
        );
    }
}
