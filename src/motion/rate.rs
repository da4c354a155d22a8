//! Periodic rate generator state.
//!
//! [`RateProgram`] is the state shared between the foreground arming call and
//! the timer interrupt. It is built from atomics and has a `const`
//! constructor so it can live in a `static` next to the interrupt handler.
//!
//! Ownership rules:
//! - The foreground rewrites the program only while the timer is stopped
//!   (stop, rewrite, restart). [`MotionEngine::arm`] follows this protocol.
//! - After arming, `steps_emitted` and `divisor_counter` are written only by
//!   [`RateProgram::service`], i.e. from the interrupt handler.
//! - The foreground may read any field at any time.
//!
//! Only plain loads and stores are used, so cores without compare-and-swap
//! are supported. That is sound because each field has a single writer at
//! any given time.
//!
//! [`MotionEngine::arm`]: crate::motor::MotionEngine::arm

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::motor::periph::PeriodicTimer;
use crate::motor::state::GeneratorState;

/// Toggle budget and rate divisor driven by the periodic timer.
#[derive(Debug)]
pub struct RateProgram {
    armed: AtomicBool,
    step_budget: AtomicU32,
    rate_divisor: AtomicU32,
    steps_emitted: AtomicU32,
    divisor_counter: AtomicU32,
}

impl RateProgram {
    /// Create an idle program with an empty budget.
    pub const fn new() -> Self {
        Self {
            armed: AtomicBool::new(false),
            step_budget: AtomicU32::new(0),
            rate_divisor: AtomicU32::new(1),
            steps_emitted: AtomicU32::new(0),
            divisor_counter: AtomicU32::new(0),
        }
    }

    /// Rewrite the program and zero both counters.
    ///
    /// The periodic timer must be stopped while this runs.
    pub(crate) fn load(&self, step_budget: u32, rate_divisor: u32) {
        self.armed.store(false, Ordering::Release);
        self.step_budget.store(step_budget, Ordering::Relaxed);
        self.rate_divisor.store(rate_divisor, Ordering::Relaxed);
        self.steps_emitted.store(0, Ordering::Relaxed);
        self.divisor_counter.store(0, Ordering::Relaxed);
        self.armed.store(true, Ordering::Release);
    }

    /// Stop the periodic timer and return to idle.
    ///
    /// Counters keep their last values so progress stays readable.
    pub fn stop<T: PeriodicTimer + ?Sized>(&self, timer: &mut T) {
        timer.stop();
        self.armed.store(false, Ordering::Release);
    }

    /// Interrupt-side tick.
    ///
    /// Advances the divisor window and, when a window closes with budget
    /// left, calls `toggle` and counts the toggle. Returns whether a toggle
    /// was emitted. Keeps dividing after the budget is spent; it never
    /// blocks and never checks the driver enable line.
    pub fn service<E, F>(&self, toggle: F) -> Result<bool, E>
    where
        F: FnOnce() -> Result<(), E>,
    {
        if !self.armed.load(Ordering::Acquire) {
            return Ok(false);
        }

        let divisor = self.rate_divisor.load(Ordering::Relaxed);
        let mut counter = self.divisor_counter.load(Ordering::Relaxed).wrapping_add(1);
        if counter >= divisor {
            counter = 0;
        }
        self.divisor_counter.store(counter, Ordering::Relaxed);

        if counter != 0 {
            return Ok(false);
        }

        let emitted = self.steps_emitted.load(Ordering::Relaxed);
        if emitted >= self.step_budget.load(Ordering::Relaxed) {
            return Ok(false);
        }

        toggle()?;
        self.steps_emitted.store(emitted + 1, Ordering::Release);
        Ok(true)
    }

    /// Generator state.
    #[inline]
    pub fn state(&self) -> GeneratorState {
        if self.armed.load(Ordering::Acquire) {
            GeneratorState::Armed
        } else {
            GeneratorState::Idle
        }
    }

    /// Toggle budget (magnitude of the armed step budget).
    #[inline]
    pub fn step_budget(&self) -> u32 {
        self.step_budget.load(Ordering::Relaxed)
    }

    /// Base periods per toggle.
    #[inline]
    pub fn rate_divisor(&self) -> u32 {
        self.rate_divisor.load(Ordering::Relaxed)
    }

    /// Toggles emitted since the last arm.
    #[inline]
    pub fn steps_emitted(&self) -> u32 {
        self.steps_emitted.load(Ordering::Acquire)
    }

    /// Ticks into the current divisor window.
    #[inline]
    pub fn divisor_counter(&self) -> u32 {
        self.divisor_counter.load(Ordering::Relaxed)
    }

    /// Whether the whole budget has been emitted.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.steps_emitted() >= self.step_budget()
    }
}

impl Default for RateProgram {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    fn tick(program: &RateProgram) -> bool {
        program.service(|| Ok::<(), Infallible>(())).unwrap()
    }

    #[test]
    fn test_idle_program_never_toggles() {
        let program = RateProgram::new();
        assert_eq!(program.state(), GeneratorState::Idle);
        assert!(!(0..10).any(|_| tick(&program)));
        assert_eq!(program.steps_emitted(), 0);
    }

    #[test]
    fn test_toggle_ticks() {
        let program = RateProgram::new();
        program.load(3, 4);

        let mut ticks: heapless::Vec<u32, 8> = heapless::Vec::new();
        for t in 1..=20u32 {
            if tick(&program) {
                ticks.push(t).unwrap();
            }
        }
        assert_eq!(ticks.as_slice(), &[4, 8, 12]);
        assert_eq!(program.steps_emitted(), 3);
        assert!(program.is_exhausted());
    }

    #[test]
    fn test_keeps_dividing_after_budget() {
        let program = RateProgram::new();
        program.load(1, 3);

        for _ in 0..3 {
            tick(&program);
        }
        assert!(program.is_exhausted());

        for expected in [1, 2, 0, 1] {
            assert!(!tick(&program));
            assert_eq!(program.divisor_counter(), expected);
        }
        assert_eq!(program.state(), GeneratorState::Armed);
    }

    #[test]
    fn test_divisor_one_toggles_every_tick() {
        let program = RateProgram::new();
        program.load(5, 1);
        assert!((0..5).all(|_| tick(&program)));
        assert!(!tick(&program));
    }

    #[test]
    fn test_failed_toggle_is_not_counted() {
        let program = RateProgram::new();
        program.load(2, 1);
        assert_eq!(program.service(|| Err("pin")), Err("pin"));
        assert_eq!(program.steps_emitted(), 0);
    }

    #[test]
    fn test_reload_resets_counters() {
        let program = RateProgram::new();
        program.load(4, 2);
        for _ in 0..5 {
            tick(&program);
        }
        assert_eq!(program.steps_emitted(), 2);

        program.load(6, 3);
        assert_eq!(program.steps_emitted(), 0);
        assert_eq!(program.divisor_counter(), 0);
        assert_eq!(program.step_budget(), 6);
        assert_eq!(program.rate_divisor(), 3);
    }
}
