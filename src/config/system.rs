//! System configuration - root configuration structure.

use serde::Deserialize;

use super::driver::DriverConfig;
use super::timer::TimerConfig;
use super::trapezoid::TrapezoidConfig;

/// Root configuration structure from TOML.
///
/// Every section is optional; omitted sections take the firmware defaults.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SystemConfig {
    /// Driver wiring and delay resolution.
    #[serde(default)]
    pub driver: DriverConfig,

    /// Periodic rate generator timing.
    #[serde(default)]
    pub timer: TimerConfig,

    /// Trapezoidal profile shape.
    #[serde(default)]
    pub trapezoid: TrapezoidConfig,
}
