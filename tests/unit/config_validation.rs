//! Unit tests for configuration validation.

use stepper_pulse::config::{validate_config, SystemConfig, TrapezoidConfig};
use stepper_pulse::error::{ConfigError, Error};

/// Test validation of the default configuration.
#[test]
fn test_default_config_passes_validation() {
    assert!(validate_config(&SystemConfig::default()).is_ok());
}

/// Test validation fails for a zero base period.
#[test]
fn test_zero_base_period() {
    let mut config = SystemConfig::default();
    config.timer.base_period_us = 0;

    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidBasePeriod(0)))
    );
}

/// Test validation fails for a current reference beyond 12 bits.
#[test]
fn test_current_reference_out_of_range() {
    let mut config = SystemConfig::default();
    config.driver.current_reference = 4096;

    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidCurrentReference(4096)))
    );
}

/// Test validation fails when deceleration starts past the end.
#[test]
fn test_decel_past_total() {
    let mut config = SystemConfig::default();
    config.trapezoid = TrapezoidConfig {
        decel_start: 4000,
        ..TrapezoidConfig::default()
    };

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidZones { decel_start: 4000, .. }))
    ));
}

/// Test a profile without a cruise zone is accepted.
#[test]
fn test_no_cruise_zone_is_valid() {
    let mut config = SystemConfig::default();
    config.trapezoid.accel_steps = 1600;
    config.trapezoid.decel_start = 1600;

    assert!(validate_config(&config).is_ok());
    assert_eq!(config.trapezoid.cruise_steps(), 0);
}

/// Test validation fails for a zero minimum delay.
#[test]
fn test_zero_min_delay() {
    let mut config = SystemConfig::default();
    config.trapezoid.min_delay = 0;

    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidMinDelay(0)))
    );
}
