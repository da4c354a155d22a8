//! Unit tests for TOML configuration parsing.

use stepper_pulse::config::{load_config, parse_config, SystemConfig, TimeUnit};
use stepper_pulse::error::{ConfigError, Error};

/// Test parsing a full configuration from TOML.
#[test]
fn test_parse_full_config() {
    let toml_str = r#"
[driver]
invert_direction = true
enable_active_low = false
time_unit = "us"
current_reference = 2048

[timer]
base_period_us = 500

[trapezoid]
total_steps = 1000
accel_steps = 100
decel_start = 900
start_delay = 8
min_delay = 2
cadence = 10
"#;

    let config = parse_config(toml_str).expect("Failed to parse TOML");

    assert!(config.driver.invert_direction);
    assert!(!config.driver.enable_active_low);
    assert_eq!(config.driver.time_unit, TimeUnit::Microseconds);
    assert_eq!(config.driver.current_reference, 2048);
    assert_eq!(config.timer.base_period_us, 500);
    assert_eq!(config.trapezoid.total_steps, 1000);
    assert_eq!(config.trapezoid.cruise_steps(), 800);
    assert_eq!(config.trapezoid.decel_steps(), 100);
}

/// Test that omitted sections fall back to the firmware defaults.
#[test]
fn test_missing_sections_use_defaults() {
    let config = parse_config("[timer]\nbase_period_us = 250\n").unwrap();

    assert_eq!(config.driver, SystemConfig::default().driver);
    assert_eq!(config.trapezoid, SystemConfig::default().trapezoid);
    assert_eq!(config.timer.base_period_us, 250);
}

/// Test that an unknown time unit is a parse error.
#[test]
fn test_unknown_time_unit() {
    let result = parse_config("[driver]\ntime_unit = \"ns\"\n");

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::ParseError(_)))
    ));
}

/// Test loading from a file on disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join("stepper_pulse_load_config_test.toml");
    std::fs::write(&path, "[trapezoid]\nstart_delay = 12\n").unwrap();

    let config = load_config(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.trapezoid.start_delay, 12);
}

/// Test that a missing file reports an I/O error.
#[test]
fn test_load_config_missing_file() {
    let result = load_config("/nonexistent/stepper_pulse.toml");

    assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
}
