//! Configuration module for stepper-pulse.
//!
//! Provides types for loading and validating driver, timer and profile
//! configuration from TOML files (with `std` feature) or built in code.

mod driver;
#[cfg(feature = "std")]
mod loader;
mod system;
mod timer;
mod trapezoid;
pub mod units;
mod validation;

pub use driver::{DriverConfig, FULL_SCALE_CURRENT_REFERENCE};
pub use system::SystemConfig;
pub use timer::{TimerConfig, DEFAULT_BASE_PERIOD_US};
pub use trapezoid::{
    TrapezoidConfig, DEFAULT_ACCEL_STEPS, DEFAULT_CADENCE, DEFAULT_DECEL_START,
    DEFAULT_MIN_DELAY, DEFAULT_START_DELAY, DEFAULT_TOTAL_STEPS,
};
pub use validation::validate_config;
pub(crate) use validation::validate_trapezoid;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

pub use units::TimeUnit;
