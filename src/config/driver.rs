//! Driver IC wiring configuration from TOML.

use serde::Deserialize;

use super::units::TimeUnit;

/// Full-scale code for the 12-bit current reference DAC.
pub const FULL_SCALE_CURRENT_REFERENCE: u16 = 4095;

/// How the step/direction driver is wired and timed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DriverConfig {
    /// Invert direction pin logic (clockwise drives the line low by default).
    #[serde(default)]
    pub invert_direction: bool,

    /// Output-enable line is active low (low level enables the outputs).
    #[serde(default = "default_enable_active_low")]
    pub enable_active_low: bool,

    /// Resolution of every delay argument.
    #[serde(default)]
    pub time_unit: TimeUnit,

    /// Current reference written to the DAC when the driver is enabled.
    #[serde(default = "default_current_reference")]
    pub current_reference: u16,
}

fn default_enable_active_low() -> bool {
    true
}

fn default_current_reference() -> u16 {
    FULL_SCALE_CURRENT_REFERENCE
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            invert_direction: false,
            enable_active_low: default_enable_active_low(),
            time_unit: TimeUnit::default(),
            current_reference: default_current_reference(),
        }
    }
}
