//! Content domain: unit tests for controller config loading.

use std::path::Path;

use super::{
    CONFIG_SCHEMA_VERSION, ControllerConfig, load_controller_config, parse_controller_config,
    write_controller_config,
};
use crate::locomotion::{GameLayer, RunKeyMode, TriggerPolicy};

#[test]
fn test_defaults_round_trip_through_ron() {
    let config = ControllerConfig::default();
    let text = write_controller_config(&config).expect("serialize");
    let parsed = parse_controller_config("roundtrip.ron", &text).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn test_missing_fields_keep_defaults() {
    let text = r#"(
        schema_version: 1,
        locomotion: (
            run_speed: 6.0,
            run_key_mode: Hold,
        ),
        hard_land_lock: 1.5,
    )"#;
    let config = parse_controller_config("partial.ron", text).expect("parse");
    let defaults = ControllerConfig::default();

    assert_eq!(config.locomotion.run_speed, 6.0);
    assert_eq!(config.locomotion.run_key_mode, RunKeyMode::Hold);
    assert_eq!(config.locomotion.walk_speed, defaults.locomotion.walk_speed);
    assert_eq!(config.hard_land_lock, 1.5);
    assert_eq!(config.ground_sensor, defaults.ground_sensor);
    assert_eq!(config.animation, defaults.animation);
}

#[test]
fn test_sensor_and_audio_sections_parse() {
    let text = r#"(
        water_sensor: (
            offset: 0.5,
            radius: 0.4,
            layers: [Water, Default],
            triggers: Ignore,
        ),
        audio: (
            footstep: (path: "audio/step.ogg", volume: 0.4),
            jump_grunts: ["audio/grunt_a.ogg", None],
            left_side_name: "L",
        ),
    )"#;
    let config = parse_controller_config("sensors.ron", text).expect("parse");

    assert_eq!(config.water_sensor.layers, vec![GameLayer::Water, GameLayer::Default]);
    assert_eq!(config.water_sensor.triggers, TriggerPolicy::Ignore);
    assert!(!config.water_sensor.draw);
    assert_eq!(config.audio.footstep.path.as_deref(), Some("audio/step.ogg"));
    assert_eq!(config.audio.footstep.volume, 0.4);
    assert_eq!(
        config.audio.jump_grunts,
        vec![Some("audio/grunt_a.ogg".to_string()), None]
    );
    assert_eq!(config.audio.left_side_name, "L");
}

#[test]
fn test_malformed_file_reports_file_and_reason() {
    let err = parse_controller_config("broken.ron", "(locomotion: (walk_speed: fast))")
        .expect_err("should fail");
    assert_eq!(err.file, "broken.ron");
    assert!(err.message.starts_with("Parse error"));
    assert!(err.to_string().starts_with("Failed to load broken.ron"));
}

#[test]
fn test_incomplete_sensor_is_rejected() {
    let err = parse_controller_config("sensor.ron", "(ground_sensor: (radius: 0.3))")
        .expect_err("should fail");
    assert!(err.message.contains("offset"));
}

#[test]
fn test_unknown_schema_version_is_rejected() {
    let text = format!("(schema_version: {})", CONFIG_SCHEMA_VERSION + 1);
    let err = parse_controller_config("future.ron", &text).expect_err("should fail");
    assert!(err.message.contains("schema_version"));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load_controller_config(Path::new("does/not/exist.ron")).expect_err("should fail");
    assert!(err.message.starts_with("IO error"));
}

#[test]
fn test_shipped_config_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/data/controller.ron");
    let config = load_controller_config(&path).expect("shipped config");
    assert_eq!(config.schema_version, CONFIG_SCHEMA_VERSION);
    assert_eq!(config, ControllerConfig::default());
}
