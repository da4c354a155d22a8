//! Motor module for stepper-pulse.
//!
//! Provides the motion engine, its pin wrappers, the interrupt-side step
//! ticker and the collaborator traits for the periodic timer and board
//! peripherals.

mod builder;
mod driver;
mod gate;
pub mod periph;
mod port;
mod shared;
pub mod state;
mod ticker;

pub use builder::MotionEngineBuilder;
pub use driver::MotionEngine;
pub use gate::DriverEnableGate;
pub use periph::{PeriodicTimer, Peripherals};
pub use port::PulsePort;
pub use shared::{CsState, LocalState, SharedPin, SharedState};
pub use state::GeneratorState;
pub use ticker::StepTicker;
