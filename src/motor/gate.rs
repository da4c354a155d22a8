//! Driver output-enable gate.
//!
//! The OE line is an output, so its state is read back from the pin's output
//! latch rather than tracked separately. Whatever last drove the line decides
//! whether motion is allowed.

use embedded_hal::digital::StatefulOutputPin;

use crate::error::{MotorError, Result};

/// Output-enable line of the driver IC.
pub struct DriverEnableGate<OE> {
    pin: OE,
    /// Low level enables the driver outputs.
    active_low: bool,
}

impl<OE: StatefulOutputPin> DriverEnableGate<OE> {
    /// Wrap the OE pin.
    pub fn new(pin: OE, active_low: bool) -> Self {
        Self { pin, active_low }
    }

    /// Whether the driver outputs are enabled.
    pub fn is_enabled(&mut self) -> Result<bool> {
        let high = self.pin.is_set_high().map_err(|_| MotorError::PinError)?;
        Ok(high != self.active_low)
    }

    /// Fail with [`MotorError::DriverDisabled`] unless enabled.
    pub fn ensure_enabled(&mut self) -> Result<()> {
        if self.is_enabled()? {
            Ok(())
        } else {
            Err(MotorError::DriverDisabled.into())
        }
    }

    /// Enable the driver outputs.
    pub fn enable(&mut self) -> Result<()> {
        self.drive(true)
    }

    /// Disable the driver outputs.
    pub fn disable(&mut self) -> Result<()> {
        self.drive(false)
    }

    /// Apply an `enable` command argument.
    ///
    /// Follows the inverted OE convention: `0` enables motion, anything else
    /// disables it.
    pub fn apply_state(&mut self, state: u32) -> Result<()> {
        if state == 0 {
            self.enable()
        } else {
            self.disable()
        }
    }

    /// Give the pin back.
    pub fn release(self) -> OE {
        self.pin
    }

    fn drive(&mut self, enabled: bool) -> Result<()> {
        let result = if enabled == self.active_low {
            self.pin.set_low()
        } else {
            self.pin.set_high()
        };
        result.map_err(|_| MotorError::PinError)?;
        Ok(())
    }
}
