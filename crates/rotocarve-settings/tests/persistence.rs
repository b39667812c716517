use rotocarve_settings::{ConfigError, MachiningDescriptor, ResampleMode};
use tempfile::tempdir;

fn sample() -> MachiningDescriptor {
    let mut d = MachiningDescriptor::new("owl.stl", 42.0);
    d.transformation.position_x = 12.5;
    d.transformation.position_y = -3.0;
    d.gcode_config.density = 4.0;
    d.gcode_config.layer_height = Some(0.5);
    d.gcode_config.resample_mode = ResampleMode::LegacyOpenChain;
    d
}

#[test]
fn test_json_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("job.json");
    let d = sample();
    d.save_to_file(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"uploadName\": \"owl.stl\""));
    assert!(text.contains("\"resampleMode\": \"legacy_open_chain\""));

    assert_eq!(MachiningDescriptor::load_from_file(&path).unwrap(), d);
}

#[test]
fn test_toml_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("job.toml");
    let d = sample();
    d.save_to_file(&path).unwrap();
    assert_eq!(MachiningDescriptor::load_from_file(&path).unwrap(), d);
}

#[test]
fn test_hand_written_toml() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("job.toml");
    std::fs::write(
        &path,
        r#"
uploadName = "vase.stl"
diameter = 60
isRotate = true

[gcodeConfig]
toolAngle = 20
"#,
    )
    .unwrap();

    let d = MachiningDescriptor::load_from_file(&path).unwrap();
    assert_eq!(d.diameter, 60.0);
    assert_eq!(d.gcode_config.tool_angle, 20.0);
    assert_eq!(d.gcode_config.density, 5.0);
}

#[test]
fn test_unsupported_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("job.yaml");
    assert!(matches!(
        sample().save_to_file(&path),
        Err(ConfigError::UnsupportedFormat(_))
    ));
    std::fs::write(&path, "uploadName: x").unwrap();
    assert!(matches!(
        MachiningDescriptor::load_from_file(&path),
        Err(ConfigError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_invalid_descriptor_is_rejected_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("job.json");
    std::fs::write(&path, r#"{ "uploadName": "a.stl", "diameter": -1 }"#).unwrap();
    assert!(matches!(
        MachiningDescriptor::load_from_file(&path),
        Err(ConfigError::Invalid { .. })
    ));
}

#[test]
fn test_malformed_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("job.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        MachiningDescriptor::load_from_file(&path),
        Err(ConfigError::Json(_))
    ));
}
