//! Trapezoidal profile shape.

use serde::Deserialize;

/// Steps in one full profile run.
pub const DEFAULT_TOTAL_STEPS: u32 = 3200;
/// First step index past the acceleration zone.
pub const DEFAULT_ACCEL_STEPS: u32 = 200;
/// First step index of the deceleration zone.
pub const DEFAULT_DECEL_START: u32 = 3000;
/// Delay at step 0, in time units.
pub const DEFAULT_START_DELAY: u32 = 10;
/// Cruise delay and acceleration floor, in time units.
pub const DEFAULT_MIN_DELAY: u32 = 1;
/// Steps between one-unit delay changes.
pub const DEFAULT_CADENCE: u32 = 20;

/// Constants that fix the achieved acceleration and top speed of the
/// trapezoidal profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TrapezoidConfig {
    /// Steps in one run.
    pub total_steps: u32,
    /// Acceleration covers `0..accel_steps`.
    pub accel_steps: u32,
    /// Deceleration covers `decel_start..total_steps`.
    pub decel_start: u32,
    /// Delay at the first step.
    pub start_delay: u32,
    /// Delay floor, held through cruise.
    pub min_delay: u32,
    /// Delay changes by one every `cadence` steps while ramping.
    pub cadence: u32,
}

impl Default for TrapezoidConfig {
    fn default() -> Self {
        Self {
            total_steps: DEFAULT_TOTAL_STEPS,
            accel_steps: DEFAULT_ACCEL_STEPS,
            decel_start: DEFAULT_DECEL_START,
            start_delay: DEFAULT_START_DELAY,
            min_delay: DEFAULT_MIN_DELAY,
            cadence: DEFAULT_CADENCE,
        }
    }
}

impl TrapezoidConfig {
    /// Steps spent at constant speed.
    #[inline]
    pub fn cruise_steps(&self) -> u32 {
        self.decel_start.saturating_sub(self.accel_steps)
    }

    /// Steps spent decelerating.
    #[inline]
    pub fn decel_steps(&self) -> u32 {
        self.total_steps.saturating_sub(self.decel_start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_zones() {
        let config = TrapezoidConfig::default();
        assert_eq!(config.accel_steps, 200);
        assert_eq!(config.cruise_steps(), 2800);
        assert_eq!(config.decel_steps(), 200);
    }
}
