//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::driver::FULL_SCALE_CURRENT_REFERENCE;
use super::{DriverConfig, SystemConfig, TimerConfig, TrapezoidConfig};

/// Validate a system configuration.
///
/// Checks:
/// - Trapezoid zones are ordered and the delays are usable
/// - Timer base period is non-zero
/// - Current reference fits the DAC
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    validate_driver(&config.driver)?;
    validate_timer(&config.timer)?;
    validate_trapezoid(&config.trapezoid)?;
    Ok(())
}

pub(crate) fn validate_driver(config: &DriverConfig) -> Result<()> {
    if config.current_reference > FULL_SCALE_CURRENT_REFERENCE {
        return Err(Error::Config(ConfigError::InvalidCurrentReference(
            config.current_reference,
        )));
    }
    Ok(())
}

pub(crate) fn validate_timer(config: &TimerConfig) -> Result<()> {
    if config.base_period_us == 0 {
        return Err(Error::Config(ConfigError::InvalidBasePeriod(0)));
    }
    Ok(())
}

pub(crate) fn validate_trapezoid(config: &TrapezoidConfig) -> Result<()> {
    if config.cadence == 0 {
        return Err(Error::Config(ConfigError::InvalidCadence(0)));
    }

    if config.min_delay == 0 {
        return Err(Error::Config(ConfigError::InvalidMinDelay(0)));
    }

    if config.start_delay < config.min_delay {
        return Err(Error::Config(ConfigError::InvalidStartDelay {
            start: config.start_delay,
            floor: config.min_delay,
        }));
    }

    if config.accel_steps > config.decel_start || config.decel_start > config.total_steps {
        return Err(Error::Config(ConfigError::InvalidZones {
            accel_steps: config.accel_steps,
            decel_start: config.decel_start,
            total_steps: config.total_steps,
        }));
    }

    Ok(())
}
