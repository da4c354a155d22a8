//! Command dispatcher.
//!
//! Owns one motion engine together with its collaborators and maps parsed
//! commands onto engine operations.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, StatefulOutputPin};

use crate::config::{SystemConfig, FULL_SCALE_CURRENT_REFERENCE};
use crate::error::{MotorError, Result};
use crate::motion::RateProgram;
use crate::motor::{MotionEngine, PeriodicTimer, Peripherals};

use super::parser::{Command, CommandInfo, COMMANDS};

/// Successful command outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Command completed; nothing to print.
    Done,
    /// Command listing requested by `help`.
    Help(&'static [CommandInfo]),
}

/// Interactive front end for one axis.
pub struct Shell<'p, STEP, DIR, OE, DELAY, T, P>
where
    STEP: StatefulOutputPin,
    DIR: OutputPin,
    OE: StatefulOutputPin,
    DELAY: DelayNs,
    T: PeriodicTimer,
    P: Peripherals,
{
    engine: MotionEngine<STEP, DIR, OE, DELAY>,
    program: &'p RateProgram,
    timer: T,
    peripherals: P,
    current_reference: u16,
    initialized: bool,
}

impl<'p, STEP, DIR, OE, DELAY, T, P> Shell<'p, STEP, DIR, OE, DELAY, T, P>
where
    STEP: StatefulOutputPin,
    DIR: OutputPin,
    OE: StatefulOutputPin,
    DELAY: DelayNs,
    T: PeriodicTimer,
    P: Peripherals,
{
    /// Create a shell writing the full-scale current reference.
    ///
    /// Motion commands fail until `init` succeeds.
    pub fn new(
        engine: MotionEngine<STEP, DIR, OE, DELAY>,
        program: &'p RateProgram,
        timer: T,
        peripherals: P,
    ) -> Self {
        Self {
            engine,
            program,
            timer,
            peripherals,
            current_reference: FULL_SCALE_CURRENT_REFERENCE,
            initialized: false,
        }
    }

    /// Create a shell using the driver settings of `config`.
    pub fn from_config(
        engine: MotionEngine<STEP, DIR, OE, DELAY>,
        program: &'p RateProgram,
        timer: T,
        peripherals: P,
        config: &SystemConfig,
    ) -> Self {
        Self::new(engine, program, timer, peripherals)
            .with_current_reference(config.driver.current_reference)
    }

    /// Set the DAC code written by `enable`.
    pub fn with_current_reference(mut self, code: u16) -> Self {
        self.current_reference = code;
        self
    }

    /// Whether `init` has succeeded.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The motion engine.
    #[inline]
    pub fn engine(&self) -> &MotionEngine<STEP, DIR, OE, DELAY> {
        &self.engine
    }

    /// The motion engine, mutably.
    #[inline]
    pub fn engine_mut(&mut self) -> &mut MotionEngine<STEP, DIR, OE, DELAY> {
        &mut self.engine
    }

    /// The periodic timer.
    #[inline]
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// The board collaborator.
    #[inline]
    pub fn peripherals(&self) -> &P {
        &self.peripherals
    }

    /// The shared rate program.
    #[inline]
    pub fn program(&self) -> &'p RateProgram {
        self.program
    }

    /// Parse and run one line. Blank lines do nothing.
    pub fn run_line(&mut self, line: &str) -> Result<Response> {
        match Command::parse(line)? {
            Some(command) => self.execute(command),
            None => Ok(Response::Done),
        }
    }

    /// Run one command.
    ///
    /// # Errors
    ///
    /// - [`MotorError::NotInitialized`] for motion before a successful `init`
    /// - [`MotorError::PeripheralInit`] when board bring-up fails
    /// - [`MotorError::DriverControl`] when `enable` cannot write the
    ///   driver support lines or the current reference
    /// - any error of the engine operation the command maps to
    pub fn execute(&mut self, command: Command) -> Result<Response> {
        if command.is_motion() && !self.initialized {
            warn!("{} rejected: not initialized", command.name());
            return Err(MotorError::NotInitialized.into());
        }

        match command {
            Command::Init => self.init()?,
            Command::Enable { state } => self.enable(state)?,
            Command::Step { steps, delay } => self.engine.step(steps, delay)?,
            Command::StepTimer {
                step_budget,
                rate_divisor,
            } => self
                .engine
                .arm(self.program, &mut self.timer, step_budget, rate_divisor)?,
            Command::StepTrapezoid => self.engine.run_trapezoid()?,
            Command::StepStop => self.program.stop(&mut self.timer),
            Command::Help => return Ok(Response::Help(COMMANDS)),
        }

        Ok(Response::Done)
    }

    /// Service one periodic interrupt if the timer is running.
    ///
    /// Host-side drivers call this in place of the hardware interrupt.
    /// Returns whether the step line toggled.
    pub fn tick(&mut self) -> Result<bool> {
        if !self.timer.is_running() {
            return Ok(false);
        }
        self.engine.on_tick(self.program)
    }

    /// Tear down, returning the engine and collaborators.
    pub fn into_parts(self) -> (MotionEngine<STEP, DIR, OE, DELAY>, T, P) {
        (self.engine, self.timer, self.peripherals)
    }

    fn init(&mut self) -> Result<()> {
        if let Err(_e) = self.peripherals.init() {
            warn!("peripheral init failed");
            self.initialized = false;
            return Err(MotorError::PeripheralInit.into());
        }
        self.initialized = true;
        info!("{}: peripherals initialized", self.engine.name());
        Ok(())
    }

    fn enable(&mut self, state: u32) -> Result<()> {
        // No toggles may reach a driver that is being disabled.
        if state != 0 {
            self.program.stop(&mut self.timer);
        }

        self.peripherals
            .wake_driver()
            .map_err(|_| MotorError::DriverControl)?;
        self.engine.gate_mut().apply_state(state)?;
        self.peripherals
            .set_current_reference(self.current_reference)
            .map_err(|_| MotorError::DriverControl)?;

        debug!("enable state {}", state);
        Ok(())
    }
}
