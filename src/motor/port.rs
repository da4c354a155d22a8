//! Step and direction outputs.

use embedded_hal::digital::{OutputPin, PinState, StatefulOutputPin};

use crate::error::{MotorError, Result};
use crate::motion::Direction;

/// The STEP and DIR lines of the driver.
///
/// Generic over:
/// - `STEP`: STEP pin type (must implement `StatefulOutputPin` so it can be
///   toggled and read back)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
pub struct PulsePort<STEP, DIR> {
    step_pin: STEP,
    dir_pin: DIR,
    /// Whether direction pin logic is inverted.
    invert_direction: bool,
    /// Last direction written, for reporting.
    direction: Option<Direction>,
}

impl<STEP, DIR> PulsePort<STEP, DIR>
where
    STEP: StatefulOutputPin,
    DIR: OutputPin,
{
    /// Create a port over the two lines.
    pub fn new(step_pin: STEP, dir_pin: DIR, invert_direction: bool) -> Self {
        Self {
            step_pin,
            dir_pin,
            invert_direction,
            direction: None,
        }
    }

    /// Flip the step line.
    #[inline]
    pub fn toggle(&mut self) -> Result<()> {
        self.step_pin.toggle().map_err(|_| MotorError::PinError)?;
        Ok(())
    }

    /// Drive the step line to a level.
    #[inline]
    pub fn set(&mut self, level: PinState) -> Result<()> {
        self.step_pin.set_state(level).map_err(|_| MotorError::PinError)?;
        Ok(())
    }

    /// Read back the driven level of the step line.
    #[inline]
    pub fn read(&mut self) -> Result<PinState> {
        let high = self.step_pin.is_set_high().map_err(|_| MotorError::PinError)?;
        Ok(PinState::from(high))
    }

    /// Drive the direction line to a raw level.
    pub fn set_direction(&mut self, level: PinState) -> Result<()> {
        self.dir_pin.set_state(level).map_err(|_| MotorError::PinError)?;
        self.direction = None;
        Ok(())
    }

    /// Drive the direction line for a direction, honouring inversion.
    ///
    /// Written on every call, even when the direction is unchanged.
    pub fn set_direction_for(&mut self, direction: Direction) -> Result<()> {
        self.dir_pin
            .set_state(direction.level(self.invert_direction))
            .map_err(|_| MotorError::PinError)?;
        self.direction = Some(direction);
        Ok(())
    }

    /// Last direction written through [`set_direction_for`](Self::set_direction_for).
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Whether direction pin logic is inverted.
    #[inline]
    pub fn invert_direction(&self) -> bool {
        self.invert_direction
    }

    /// Give the pins back.
    pub fn release(self) -> (STEP, DIR) {
        (self.step_pin, self.dir_pin)
    }
}
