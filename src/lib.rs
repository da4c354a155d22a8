//! # stepper-pulse
//!
//! Step/direction pulse generation for a single stepper motor driver, with
//! embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Three stepping disciplines**: blocking fixed-rate steps, a periodic
//!   timer-driven rate generator, and a trapezoidal acceleration profile
//! - **embedded-hal 1.0**: Uses `StatefulOutputPin` for STEP/OE, `OutputPin`
//!   for DIR, `DelayNs` for timing
//! - **Interrupt-safe rate program**: atomics only, `const` constructible
//! - **no_std compatible**: Core library works without standard library
//! - **Command console**: line parser and dispatcher for interactive use
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_pulse::{CsState, MotionEngine, RateProgram, SharedPin, StepTicker};
//!
//! static PROGRAM: RateProgram = RateProgram::new();
//! static STEP: CsState<StepPin> = CsState::new(step_pin);
//!
//! let mut engine = MotionEngine::builder()
//!     .step_pin(SharedPin::new(&STEP))
//!     .dir_pin(dir_pin)
//!     .enable_pin(oe_pin)
//!     .delay(delay)
//!     .build()?;
//!
//! engine.gate_mut().enable()?;
//! engine.step(200, 2)?;
//!
//! // 40 toggles, one every 4 base periods
//! engine.arm(&PROGRAM, &mut timer, 40, 4)?;
//!
//! // timer interrupt, free to preempt a blocking engine.step():
//! StepTicker::new(&PROGRAM, SharedPin::new(&STEP)).on_tick()?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables TOML config loading and the [`sim`] backends
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

// Core modules
pub mod command;
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;

#[cfg(feature = "std")]
pub mod sim;

// Re-exports for ergonomic API
pub use command::{Command, Response, Shell};
pub use config::{validate_config, DriverConfig, SystemConfig, TimerConfig, TrapezoidConfig};
pub use error::{Error, Result};
pub use motion::{Direction, MotionPhase, RateProgram, StepCommand, TrapezoidProfile};
pub use motor::{
    CsState, DriverEnableGate, GeneratorState, MotionEngine, MotionEngineBuilder, PeriodicTimer,
    Peripherals, PulsePort, SharedPin, StepTicker,
};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

pub use config::units::TimeUnit;
