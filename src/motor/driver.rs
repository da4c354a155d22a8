//! Motion engine.
//!
//! Generic over embedded-hal 1.0 pin types. One engine drives one axis: it
//! owns the STEP/DIR lines, the output-enable gate and the delay provider,
//! and runs the three stepping disciplines against them.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState, StatefulOutputPin};

use crate::config::{TimeUnit, TrapezoidConfig};
use crate::error::{MotorError, Result};
use crate::motion::{Direction, RateProgram, StepCommand, TrapezoidProfile};

use super::builder::MotionEngineBuilder;
use super::gate::DriverEnableGate;
use super::periph::PeriodicTimer;
use super::port::PulsePort;

/// Pulse generator for one step/direction driver.
///
/// Generic over:
/// - `STEP`: STEP pin type (must implement `StatefulOutputPin`)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
/// - `OE`: output-enable pin type (must implement `StatefulOutputPin`)
/// - `DELAY`: Delay provider (must implement `DelayNs`)
///
/// The blocking disciplines ([`step`](Self::step) and
/// [`run_trapezoid`](Self::run_trapezoid)) occupy the calling thread for
/// their whole duration. Callers must not run more than one discipline on
/// the same engine at a time.
pub struct MotionEngine<STEP, DIR, OE, DELAY>
where
    STEP: StatefulOutputPin,
    DIR: OutputPin,
    OE: StatefulOutputPin,
    DELAY: DelayNs,
{
    /// STEP and DIR lines.
    port: PulsePort<STEP, DIR>,

    /// Output-enable line.
    gate: DriverEnableGate<OE>,

    /// Delay provider for inter-toggle waits.
    delay: DELAY,

    /// Resolution of every delay argument.
    time_unit: TimeUnit,

    /// Trapezoidal profile shape.
    trapezoid: TrapezoidConfig,

    /// Engine name for logging/debugging.
    name: heapless::String<32>,
}

impl<STEP, DIR, OE, DELAY> MotionEngine<STEP, DIR, OE, DELAY>
where
    STEP: StatefulOutputPin,
    DIR: OutputPin,
    OE: StatefulOutputPin,
    DELAY: DelayNs,
{
    /// Create a new engine.
    pub(crate) fn new(
        port: PulsePort<STEP, DIR>,
        gate: DriverEnableGate<OE>,
        delay: DELAY,
        time_unit: TimeUnit,
        trapezoid: TrapezoidConfig,
        name: heapless::String<32>,
    ) -> Self {
        Self {
            port,
            gate,
            delay,
            time_unit,
            trapezoid,
            name,
        }
    }

    /// Start building an engine.
    pub fn builder() -> MotionEngineBuilder<STEP, DIR, OE, DELAY> {
        MotionEngineBuilder::new()
    }

    /// Get the engine name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Resolution of delay arguments.
    #[inline]
    pub fn time_unit(&self) -> TimeUnit {
        self.time_unit
    }

    /// Trapezoidal profile shape.
    #[inline]
    pub fn trapezoid_config(&self) -> &TrapezoidConfig {
        &self.trapezoid
    }

    /// Last direction driven onto the DIR line.
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        self.port.direction()
    }

    /// Whether the driver outputs are enabled.
    pub fn is_enabled(&mut self) -> Result<bool> {
        self.gate.is_enabled()
    }

    /// Access the output-enable gate.
    #[inline]
    pub fn gate_mut(&mut self) -> &mut DriverEnableGate<OE> {
        &mut self.gate
    }

    /// Access the STEP/DIR lines.
    #[inline]
    pub fn port_mut(&mut self) -> &mut PulsePort<STEP, DIR> {
        &mut self.port
    }

    /// Emit `|step_count|` pulses at a fixed rate (blocking).
    ///
    /// Sets the direction from the sign of `step_count`, then toggles the
    /// step line `2 * |step_count|` times, waiting `delay` time units after
    /// every toggle. Blocks for `2 * |step_count| * delay` time units.
    ///
    /// # Errors
    ///
    /// [`MotorError::DriverDisabled`] if the driver is disabled; nothing is
    /// written in that case.
    pub fn step(&mut self, step_count: i32, delay: u32) -> Result<()> {
        self.execute(StepCommand::new(step_count, delay))
    }

    /// Run a [`StepCommand`] to completion (blocking).
    pub fn execute(&mut self, command: StepCommand) -> Result<()> {
        self.gate.ensure_enabled()?;

        let direction = command.direction();
        self.port.set_direction_for(direction)?;
        debug!(
            "step: {} pulses, delay {}, cw={}",
            command.pulses(),
            command.delay,
            direction == Direction::Clockwise
        );

        for _ in 0..command.toggles() {
            self.port.toggle()?;
            self.wait(command.delay);
        }

        Ok(())
    }

    /// Run the trapezoidal profile clockwise (blocking).
    ///
    /// Every step drives the step line low, waits, drives it high and waits
    /// again, with the wait taken from the profile.
    ///
    /// # Errors
    ///
    /// [`MotorError::DriverDisabled`] if the driver is disabled; no partial
    /// motion happens in that case.
    pub fn run_trapezoid(&mut self) -> Result<()> {
        self.gate.ensure_enabled()?;
        self.port.set_direction_for(Direction::Clockwise)?;

        let profile = TrapezoidProfile::new(self.trapezoid);
        debug!(
            "trapezoid: {} steps, start delay {}",
            self.trapezoid.total_steps,
            self.trapezoid.start_delay
        );

        for step in profile {
            self.port.set(PinState::Low)?;
            self.wait(step.delay);
            self.port.set(PinState::High)?;
            self.wait(step.delay);
        }

        Ok(())
    }

    /// Arm the periodic rate generator.
    ///
    /// Stops `timer`, sets the direction from the sign of `step_budget`,
    /// loads `|step_budget|` toggles at one toggle per `rate_divisor` base
    /// periods, then restarts `timer`. Callers pre-double the pulse count:
    /// a budget of `2n` emits `n` full pulses.
    ///
    /// # Errors
    ///
    /// - [`MotorError::DriverDisabled`] if the driver is disabled
    /// - [`MotorError::InvalidRateDivisor`] if `rate_divisor` is zero
    ///
    /// Neither touches the timer or the program.
    pub fn arm<T>(
        &mut self,
        program: &RateProgram,
        timer: &mut T,
        step_budget: i32,
        rate_divisor: u32,
    ) -> Result<()>
    where
        T: PeriodicTimer + ?Sized,
    {
        self.gate.ensure_enabled()?;
        if rate_divisor == 0 {
            return Err(MotorError::InvalidRateDivisor(0).into());
        }

        // The handler must not observe a half-written program.
        program.stop(timer);

        self.port.set_direction_for(Direction::from_steps(step_budget))?;
        program.load(step_budget.unsigned_abs(), rate_divisor);
        timer.start();

        info!(
            "armed: budget {}, divisor {}",
            step_budget.unsigned_abs(),
            rate_divisor
        );
        Ok(())
    }

    /// Service one base period on this engine's step line.
    ///
    /// Returns whether the step line was toggled. Needs the whole engine, so
    /// it suits host-side drivers such as [`Shell::tick`]. An interrupt
    /// handler uses a [`StepTicker`] over a shared step cell instead.
    ///
    /// [`Shell::tick`]: crate::command::Shell::tick
    /// [`StepTicker`]: super::StepTicker
    #[inline]
    pub fn on_tick(&mut self, program: &RateProgram) -> Result<bool> {
        let port = &mut self.port;
        program.service(|| port.toggle())
    }

    /// Give the hardware back.
    pub fn release(self) -> (STEP, DIR, OE, DELAY) {
        let (step, dir) = self.port.release();
        (step, dir, self.gate.release(), self.delay)
    }

    fn wait(&mut self, units: u32) {
        self.time_unit.wait(&mut self.delay, units);
    }
}
