use node_launcher::{
    build_node_descriptor_from_file, record::RecordWriter, AmentIndex, LaunchError, OutputMode,
    StaticPackageIndex, StructuralError,
};
use std::{fs, path::PathBuf};

/// Helper to get fixture path from crate tests directory
fn get_fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(filename)
}

fn nav_index() -> StaticPackageIndex {
    StaticPackageIndex::new()
        .with_package("nav_config", "/opt/fleet")
        .with_package("nav2_controller", "/opt/ros/humble")
}

#[test]
fn test_full_controller_config() {
    let descriptor =
        build_node_descriptor_from_file(&get_fixture_path("nav_controller.yaml"), &nav_index())
            .unwrap();

    assert_eq!(descriptor.namespace().segments(), &["warehouse", "robot_1"]);
    assert_eq!(descriptor.name(), "controller_server");
    assert_eq!(
        descriptor.fully_qualified_name(),
        "/warehouse/robot_1/controller_server"
    );

    let params = serde_json::to_value(descriptor.parameters()).unwrap();
    assert_eq!(params["controller_frequency"], 20.0);
    assert_eq!(params["plugins"][0], "FollowPath");
    assert_eq!(
        params["FollowPath"]["critics_file"],
        "/opt/fleet/share/nav_config/critics/default.yaml"
    );
    assert_eq!(
        params["map_files"][0],
        "/opt/fleet/share/nav_config/maps/floor_1.yaml"
    );
    assert_eq!(params["map_files"][1], "/srv/maps/floor_2.yaml");
    assert!(params.get("ros_remappings").is_none());
    assert!(params.get("ros_execution").is_none());

    let remaps: Vec<(&str, &str)> = descriptor
        .remappings()
        .iter()
        .map(|(from, to)| (from.as_str(), to.as_str()))
        .collect();
    assert_eq!(
        remaps,
        vec![
            ("/cmd_vel", "/warehouse/robot_1/cmd_vel"),
            ("odom", "/warehouse/robot_1/odom"),
            ("/clear_costmap", "/warehouse/robot_1/clear_costmap"),
            (
                "/follow_path/_action/feedback",
                "/warehouse/robot_1/follow_path/_action/feedback"
            ),
            (
                "/follow_path/_action/status",
                "/warehouse/robot_1/follow_path/_action/status"
            ),
            (
                "/follow_path/_action/cancel_goal",
                "/warehouse/robot_1/follow_path/_action/cancel_goal"
            ),
            (
                "/follow_path/_action/get_result",
                "/warehouse/robot_1/follow_path/_action/get_result"
            ),
            (
                "/follow_path/_action/send_goal",
                "/warehouse/robot_1/follow_path/_action/send_goal"
            ),
        ]
    );

    let execution = descriptor.execution();
    assert_eq!(execution.package, "nav2_controller");
    assert_eq!(execution.executable, "controller_server");
    assert_eq!(execution.output, OutputMode::Screen);
    assert!(execution.emulate_tty);
    assert!(execution.respawn);
    assert_eq!(execution.respawn_delay, 2.0);
    assert!(!execution.shutdown_on_exit);
}

#[test]
fn test_minimal_config_defaults() {
    let descriptor = build_node_descriptor_from_file(
        &get_fixture_path("minimal.yaml"),
        &StaticPackageIndex::new(),
    )
    .unwrap();

    assert!(descriptor.namespace().is_empty());
    assert_eq!(descriptor.name(), "talker");
    assert!(descriptor.parameters().is_empty());
    assert!(descriptor.remappings().is_empty());
    assert_eq!(descriptor.execution().output, OutputMode::Log);
    assert!(!descriptor.execution().respawn);
    assert_eq!(descriptor.execution().respawn_delay, 0.0);
}

#[test]
fn test_json_config() {
    let index = StaticPackageIndex::new().with_package("camera_calib", "/opt/calib");
    let descriptor =
        build_node_descriptor_from_file(&get_fixture_path("camera.json"), &index).unwrap();

    assert_eq!(descriptor.namespace().as_ros_path(), "/sensors/front");
    assert_eq!(descriptor.name(), "camera_driver");
    assert_eq!(descriptor.execution().output, OutputMode::Both);

    let params = serde_json::to_value(descriptor.parameters()).unwrap();
    assert_eq!(
        params["calibration_url"],
        "/opt/calib/share/camera_calib/front.yaml"
    );
    assert_eq!(params["fps"], 30);
    assert_eq!(
        descriptor.remappings(),
        &[("image_raw".to_string(), "/sensors/front/image".to_string())]
    );
}

#[test]
fn test_two_nodes_rejected() {
    let result = build_node_descriptor_from_file(
        &get_fixture_path("two_nodes.yaml"),
        &StaticPackageIndex::new(),
    );
    assert!(matches!(
        result,
        Err(LaunchError::Structural(StructuralError::AmbiguousNodeEntry { .. }))
    ));
}

#[test]
fn test_builder_is_idempotent() {
    let fixture = get_fixture_path("nav_controller.yaml");
    let index = nav_index();

    let first = build_node_descriptor_from_file(&fixture, &index).unwrap();
    let second = build_node_descriptor_from_file(&fixture, &index).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_ament_index_on_disk() {
    let prefix = tempfile::tempdir().unwrap();
    let marker_dir = prefix
        .path()
        .join("share/ament_index/resource_index/packages");
    fs::create_dir_all(&marker_dir).unwrap();
    fs::write(marker_dir.join("nav_config"), "").unwrap();
    fs::write(marker_dir.join("nav2_controller"), "").unwrap();

    let index = AmentIndex::new([prefix.path()]);
    let descriptor =
        build_node_descriptor_from_file(&get_fixture_path("nav_controller.yaml"), &index)
            .unwrap();

    let params = serde_json::to_value(descriptor.parameters()).unwrap();
    let expected = prefix
        .path()
        .join("share/nav_config/critics/default.yaml")
        .to_string_lossy()
        .into_owned();
    assert_eq!(params["FollowPath"]["critics_file"], expected.as_str());

    let mut writer = RecordWriter::new(&index);
    descriptor.launch_with(&mut writer).unwrap();
    let record = writer.into_record_json();
    let expected_exec = prefix
        .path()
        .join("lib/nav2_controller/controller_server")
        .to_string_lossy()
        .into_owned();
    assert_eq!(record.node[0].cmd[0], expected_exec);
    assert_eq!(record.node[0].cmd[1], "--ros-args");
}

#[test]
fn test_record_json_output() {
    let descriptor =
        build_node_descriptor_from_file(&get_fixture_path("nav_controller.yaml"), &nav_index())
            .unwrap();

    let index = nav_index();
    let mut writer = RecordWriter::new(&index);
    descriptor.launch_with(&mut writer).unwrap();
    let json = writer.into_record_json().to_json().unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let node = &parsed["node"][0];
    assert_eq!(node["name"], "controller_server");
    assert_eq!(node["namespace"], "/warehouse/robot_1");
    assert_eq!(node["respawn"], true);
    assert_eq!(node["remaps"].as_array().unwrap().len(), 8);
    assert_eq!(node["params"][0][0], "controller_frequency");
    assert_eq!(node["params"][0][1], "20.0");
}
