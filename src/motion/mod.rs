//! Motion module for stepper-pulse.
//!
//! Provides the step command, the trapezoidal profile and the periodic rate
//! program shared with the timer interrupt.

mod profile;
mod rate;
mod step;

pub use profile::{Direction, MotionPhase, ProfileStep, TrapezoidProfile};
pub use rate::RateProgram;
pub use step::StepCommand;
