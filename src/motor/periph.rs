//! Collaborator peripherals outside the pulse generator.
//!
//! Board support code implements these for the real timer, DAC and driver
//! control lines.

/// Hardware timer that raises the stepping interrupt at a fixed base period.
pub trait PeriodicTimer {
    /// Start firing the periodic interrupt.
    fn start(&mut self);

    /// Stop firing. No interrupt runs after this returns.
    fn stop(&mut self);

    /// Whether the interrupt is currently enabled.
    fn is_running(&self) -> bool;
}

impl<T: PeriodicTimer + ?Sized> PeriodicTimer for &mut T {
    fn start(&mut self) {
        (**self).start()
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn is_running(&self) -> bool {
        (**self).is_running()
    }
}

/// One-time peripheral bring-up and driver support lines.
pub trait Peripherals {
    /// Error reported by the board layer.
    type Error: core::fmt::Debug;

    /// Configure clocks, pins, the DAC and the stepping timer.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Release the driver's power-save and reset lines.
    fn wake_driver(&mut self) -> Result<(), Self::Error>;

    /// Write the analog current reference (12-bit right aligned).
    fn set_current_reference(&mut self, code: u16) -> Result<(), Self::Error>;
}
