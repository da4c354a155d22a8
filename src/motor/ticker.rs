//! Interrupt-side handle of the periodic rate generator.

use embedded_hal::digital::StatefulOutputPin;

use crate::error::{Error, MotorError, Result};
use crate::motion::RateProgram;

/// Timer interrupt body: a rate program and its own handle to the STEP line.
///
/// Owns no engine state, so it runs while the foreground is inside a
/// blocking [`MotionEngine`](super::MotionEngine) call. Give it a
/// [`SharedPin`](super::SharedPin) to the engine's step cell.
pub struct StepTicker<'a, P> {
    program: &'a RateProgram,
    step: P,
}

impl<'a, P: StatefulOutputPin> StepTicker<'a, P> {
    /// Pair a program with a step line handle.
    pub fn new(program: &'a RateProgram, step: P) -> Self {
        Self { program, step }
    }

    /// Service one base period. Returns whether the step line toggled.
    #[inline]
    pub fn on_tick(&mut self) -> Result<bool> {
        let step = &mut self.step;
        self.program
            .service(|| step.toggle().map_err(|_| Error::from(MotorError::PinError)))
    }

    /// The program this ticker services.
    #[inline]
    pub fn program(&self) -> &'a RateProgram {
        self.program
    }

    /// Give the step handle back.
    pub fn release(self) -> P {
        self.step
    }
}
