//! Time units for pulse timing.
//!
//! Every delay handed to the pulse generator is a plain count of platform
//! time units. [`TimeUnit`] fixes what one unit means and maps it onto the
//! blocking [`DelayNs`] contract.

use embedded_hal::delay::DelayNs;
use serde::Deserialize;

/// Resolution of one delay unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeUnit {
    /// One unit is one millisecond (the firmware's tick resolution).
    #[default]
    #[serde(rename = "ms")]
    Milliseconds,
    /// One unit is one microsecond.
    #[serde(rename = "us")]
    Microseconds,
}

impl TimeUnit {
    /// Block the calling thread for `units` of this resolution.
    #[inline]
    pub fn wait<D: DelayNs>(self, delay: &mut D, units: u32) {
        match self {
            TimeUnit::Milliseconds => delay.delay_ms(units),
            TimeUnit::Microseconds => delay.delay_us(units),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        ms: u32,
        us: u32,
    }

    impl DelayNs for Recorder {
        fn delay_ns(&mut self, _ns: u32) {}

        fn delay_us(&mut self, us: u32) {
            self.us += us;
        }

        fn delay_ms(&mut self, ms: u32) {
            self.ms += ms;
        }
    }

    #[test]
    fn test_wait_uses_unit() {
        let mut delay = Recorder::default();
        TimeUnit::Milliseconds.wait(&mut delay, 3);
        TimeUnit::Microseconds.wait(&mut delay, 7);
        assert_eq!((delay.ms, delay.us), (3, 7));
    }

    #[test]
    fn test_default_is_milliseconds() {
        assert_eq!(TimeUnit::default(), TimeUnit::Milliseconds);
    }
}
