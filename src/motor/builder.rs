//! Builder pattern for MotionEngine.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, StatefulOutputPin};

use crate::config::{validate_trapezoid, DriverConfig, SystemConfig, TimeUnit, TrapezoidConfig};
use crate::error::{ConfigError, Error, Result};

use super::driver::MotionEngine;
use super::gate::DriverEnableGate;
use super::port::PulsePort;

/// Builder for creating MotionEngine instances.
pub struct MotionEngineBuilder<STEP, DIR, OE, DELAY>
where
    STEP: StatefulOutputPin,
    DIR: OutputPin,
    OE: StatefulOutputPin,
    DELAY: DelayNs,
{
    step_pin: Option<STEP>,
    dir_pin: Option<DIR>,
    enable_pin: Option<OE>,
    delay: Option<DELAY>,
    name: Option<heapless::String<32>>,
    invert_direction: bool,
    enable_active_low: bool,
    time_unit: TimeUnit,
    trapezoid: TrapezoidConfig,
}

impl<STEP, DIR, OE, DELAY> Default for MotionEngineBuilder<STEP, DIR, OE, DELAY>
where
    STEP: StatefulOutputPin,
    DIR: OutputPin,
    OE: StatefulOutputPin,
    DELAY: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<STEP, DIR, OE, DELAY> MotionEngineBuilder<STEP, DIR, OE, DELAY>
where
    STEP: StatefulOutputPin,
    DIR: OutputPin,
    OE: StatefulOutputPin,
    DELAY: DelayNs,
{
    /// Create a new builder with the firmware defaults.
    pub fn new() -> Self {
        let driver = DriverConfig::default();
        Self {
            step_pin: None,
            dir_pin: None,
            enable_pin: None,
            delay: None,
            name: None,
            invert_direction: driver.invert_direction,
            enable_active_low: driver.enable_active_low,
            time_unit: driver.time_unit,
            trapezoid: TrapezoidConfig::default(),
        }
    }

    /// Set the STEP pin.
    pub fn step_pin(mut self, pin: STEP) -> Self {
        self.step_pin = Some(pin);
        self
    }

    /// Set the DIR pin.
    pub fn dir_pin(mut self, pin: DIR) -> Self {
        self.dir_pin = Some(pin);
        self
    }

    /// Set the output-enable pin.
    pub fn enable_pin(mut self, pin: OE) -> Self {
        self.enable_pin = Some(pin);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the engine name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = heapless::String::try_from(name).ok();
        self
    }

    /// Set direction inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Set output-enable polarity.
    pub fn enable_active_low(mut self, active_low: bool) -> Self {
        self.enable_active_low = active_low;
        self
    }

    /// Set the delay resolution.
    pub fn time_unit(mut self, unit: TimeUnit) -> Self {
        self.time_unit = unit;
        self
    }

    /// Set the trapezoidal profile shape.
    pub fn trapezoid(mut self, config: TrapezoidConfig) -> Self {
        self.trapezoid = config;
        self
    }

    /// Configure from a DriverConfig.
    pub fn from_driver_config(mut self, config: &DriverConfig) -> Self {
        self.invert_direction = config.invert_direction;
        self.enable_active_low = config.enable_active_low;
        self.time_unit = config.time_unit;
        self
    }

    /// Configure from a SystemConfig.
    pub fn from_config(self, config: &SystemConfig) -> Self {
        self.from_driver_config(&config.driver)
            .trapezoid(config.trapezoid)
    }

    /// Build the MotionEngine.
    ///
    /// # Errors
    ///
    /// Returns an error if a pin or the delay is missing, or if the
    /// trapezoid shape is invalid.
    pub fn build(self) -> Result<MotionEngine<STEP, DIR, OE, DELAY>> {
        let step_pin = self
            .step_pin
            .ok_or(Error::Config(ConfigError::MissingComponent("step_pin")))?;

        let dir_pin = self
            .dir_pin
            .ok_or(Error::Config(ConfigError::MissingComponent("dir_pin")))?;

        let enable_pin = self
            .enable_pin
            .ok_or(Error::Config(ConfigError::MissingComponent("enable_pin")))?;

        let delay = self
            .delay
            .ok_or(Error::Config(ConfigError::MissingComponent("delay")))?;

        validate_trapezoid(&self.trapezoid)?;

        let name = match self.name {
            Some(name) => name,
            None => heapless::String::try_from("stepper").unwrap_or_default(),
        };

        Ok(MotionEngine::new(
            PulsePort::new(step_pin, dir_pin, self.invert_direction),
            DriverEnableGate::new(enable_pin, self.enable_active_low),
            delay,
            self.time_unit,
            self.trapezoid,
            name,
        ))
    }
}
