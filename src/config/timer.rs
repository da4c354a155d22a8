//! Periodic timer configuration.

use libm::roundf;
use serde::Deserialize;

/// Base period of the stepping interrupt in microseconds.
///
/// A 48 MHz timer clock with prescaler 96 and reload 500 fires every
/// millisecond.
pub const DEFAULT_BASE_PERIOD_US: u32 = 1_000;

/// Periodic rate generator timing.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TimerConfig {
    /// Interval between interrupt firings in microseconds.
    #[serde(default = "default_base_period_us")]
    pub base_period_us: u32,
}

fn default_base_period_us() -> u32 {
    DEFAULT_BASE_PERIOD_US
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            base_period_us: DEFAULT_BASE_PERIOD_US,
        }
    }
}

impl TimerConfig {
    /// Interrupt firing rate in Hz.
    pub fn base_frequency_hz(&self) -> f32 {
        if self.base_period_us == 0 {
            return 0.0;
        }
        1_000_000.0 / self.base_period_us as f32
    }

    /// Full-pulse frequency produced by a given rate divisor.
    ///
    /// Each pulse takes two toggles, one per divisor window.
    pub fn pulse_rate_hz(&self, rate_divisor: u32) -> f32 {
        if rate_divisor == 0 {
            return 0.0;
        }
        self.base_frequency_hz() / (2.0 * rate_divisor as f32)
    }

    /// Nearest rate divisor for a desired full-pulse frequency.
    ///
    /// Clamped to at least 1, which is the fastest rate the timer can produce.
    pub fn divisor_for_pulse_rate(&self, pulse_hz: f32) -> u32 {
        if pulse_hz <= 0.0 {
            return u32::MAX;
        }
        let divisor = roundf(self.base_frequency_hz() / (2.0 * pulse_hz));
        (divisor as u32).max(1)
    }
}
