//! Host-side simulation backends (std only).
//!
//! Pins, delay and timer implementations that record to a shared [`Trace`]
//! with a simulated clock instead of touching hardware. Delays advance the
//! clock without sleeping, so a full trapezoidal run completes instantly.
//!
//! ```rust,ignore
//! let trace = Trace::new();
//! let step = trace.pin(Line::Step, false);
//! let delay = trace.delay();
//! // ... run a motion, then inspect trace.edges_on(Line::Step)
//! ```

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};

use crate::motor::periph::{PeriodicTimer, Peripherals};

/// Which driver line a simulated pin stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    /// STEP line.
    Step,
    /// FR (direction) line.
    Direction,
    /// OE (output enable) line.
    Enable,
}

/// A level change on a simulated line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Simulated time of the change in nanoseconds.
    pub at_ns: u64,
    /// Line that changed.
    pub line: Line,
    /// New level (`true` = high).
    pub high: bool,
}

#[derive(Debug, Default)]
struct TraceState {
    now_ns: u64,
    edges: Vec<Edge>,
}

/// Shared simulated clock and edge log.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    inner: Rc<RefCell<TraceState>>,
}

impl Trace {
    /// Create an empty trace at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pin on `line` resting at `high`.
    pub fn pin(&self, line: Line, high: bool) -> SimPin {
        SimPin {
            line,
            high,
            trace: self.clone(),
        }
    }

    /// Create a delay provider that advances this trace's clock.
    pub fn delay(&self) -> SimDelay {
        SimDelay {
            trace: self.clone(),
        }
    }

    /// Current simulated time in nanoseconds.
    pub fn now_ns(&self) -> u64 {
        self.inner.borrow().now_ns
    }

    /// Advance the simulated clock.
    pub fn advance_ns(&self, ns: u64) {
        let mut state = self.inner.borrow_mut();
        state.now_ns = state.now_ns.saturating_add(ns);
    }

    /// Every recorded edge, oldest first.
    pub fn edges(&self) -> Vec<Edge> {
        self.inner.borrow().edges.clone()
    }

    /// Edges recorded on one line.
    pub fn edges_on(&self, line: Line) -> Vec<Edge> {
        self.inner
            .borrow()
            .edges
            .iter()
            .filter(|edge| edge.line == line)
            .copied()
            .collect()
    }

    /// Gaps between consecutive edges on one line, in nanoseconds.
    pub fn intervals_on(&self, line: Line) -> Vec<u64> {
        self.edges_on(line)
            .windows(2)
            .map(|pair| pair[1].at_ns - pair[0].at_ns)
            .collect()
    }

    /// Forget recorded edges; the clock keeps running.
    pub fn clear(&self) {
        self.inner.borrow_mut().edges.clear();
    }

    fn record(&self, line: Line, high: bool) {
        let mut state = self.inner.borrow_mut();
        let at_ns = state.now_ns;
        state.edges.push(Edge { at_ns, line, high });
    }
}

/// Output pin that records level changes to a [`Trace`].
#[derive(Debug)]
pub struct SimPin {
    line: Line,
    high: bool,
    trace: Trace,
}

impl SimPin {
    /// Current driven level.
    pub fn is_high(&self) -> bool {
        self.high
    }

    fn drive(&mut self, high: bool) {
        if self.high != high {
            self.high = high;
            self.trace.record(self.line, high);
        }
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true);
        Ok(())
    }
}

impl StatefulOutputPin for SimPin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }
}

/// Delay provider that advances a [`Trace`] clock instead of sleeping.
#[derive(Debug, Clone)]
pub struct SimDelay {
    trace: Trace,
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.trace.advance_ns(ns as u64);
    }

    fn delay_us(&mut self, us: u32) {
        self.trace.advance_ns(us as u64 * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.trace.advance_ns(ms as u64 * 1_000_000);
    }
}

/// Periodic timer that only tracks start and stop calls.
///
/// Tests fire ticks themselves while [`is_running`](PeriodicTimer::is_running)
/// holds.
#[derive(Debug, Default, Clone)]
pub struct SimTimer {
    running: bool,
    /// Number of `start` calls.
    pub starts: u32,
    /// Number of `stop` calls.
    pub stops: u32,
}

impl SimTimer {
    /// Create a stopped timer.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PeriodicTimer for SimTimer {
    fn start(&mut self) {
        self.running = true;
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.running = false;
        self.stops += 1;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

/// Board collaborator stand-in.
#[derive(Debug, Default, Clone)]
pub struct SimPeripherals {
    /// Make `init` fail.
    pub fail_init: bool,
    /// Make `wake_driver` fail.
    pub fail_wake: bool,
    /// Number of successful `init` calls.
    pub init_calls: u32,
    /// Whether the driver support lines were released.
    pub driver_awake: bool,
    /// Last current reference written.
    pub current_reference: Option<u16>,
}

impl SimPeripherals {
    /// Create peripherals that initialize successfully.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create peripherals whose `init` fails.
    pub fn failing() -> Self {
        Self {
            fail_init: true,
            ..Self::default()
        }
    }
}

impl Peripherals for SimPeripherals {
    type Error = &'static str;

    fn init(&mut self) -> Result<(), Self::Error> {
        if self.fail_init {
            return Err("DAC init failed");
        }
        self.init_calls += 1;
        Ok(())
    }

    fn wake_driver(&mut self) -> Result<(), Self::Error> {
        if self.fail_wake {
            return Err("driver wake failed");
        }
        self.driver_awake = true;
        Ok(())
    }

    fn set_current_reference(&mut self, code: u16) -> Result<(), Self::Error> {
        self.current_reference = Some(code);
        Ok(())
    }
}
