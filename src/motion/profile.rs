//! Trapezoidal velocity profile.
//!
//! The profile is computed step by step: each call to `next()` yields the
//! delay to use for one step and advances the zone bookkeeping. Nothing is
//! stored between runs.

use embedded_hal::digital::PinState;

use crate::config::TrapezoidConfig;

/// Direction of motor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise (positive step count).
    Clockwise,
    /// Counter-clockwise (zero or negative step count).
    CounterClockwise,
}

impl Direction {
    /// Get direction from signed step count.
    ///
    /// Zero maps to counter-clockwise, matching the driver's FR line being
    /// driven high for anything that is not a positive request.
    #[inline]
    pub fn from_steps(steps: i32) -> Self {
        if steps > 0 {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        }
    }

    /// Level of the direction line for this direction.
    ///
    /// Clockwise drives the line low unless `invert` is set.
    #[inline]
    pub fn level(self, invert: bool) -> PinState {
        let high = match self {
            Direction::Clockwise => invert,
            Direction::CounterClockwise => !invert,
        };
        PinState::from(high)
    }
}

/// Current phase of motion execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionPhase {
    /// Accelerating from rest toward cruise velocity.
    Accelerating,
    /// Moving at constant cruise velocity.
    Cruising,
    /// Decelerating from cruise velocity to rest.
    Decelerating,
    /// Motion complete.
    Complete,
}

/// One step of a trapezoidal run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileStep {
    /// Step index from the start of the run.
    pub index: u32,
    /// Zone the step falls in.
    pub phase: MotionPhase,
    /// Wait after each of the step's two edges, in time units.
    pub delay: u32,
}

/// Step-by-step trapezoidal profile generator.
#[derive(Debug, Clone)]
pub struct TrapezoidProfile {
    config: TrapezoidConfig,
    index: u32,
    delay: u32,
    /// Steps taken since entering the current zone.
    phase_counter: u32,
    phase: MotionPhase,
}

impl TrapezoidProfile {
    /// Create a profile positioned at step 0.
    pub fn new(config: TrapezoidConfig) -> Self {
        Self {
            config,
            index: 0,
            delay: config.start_delay,
            phase_counter: 0,
            phase: MotionPhase::Accelerating,
        }
    }

    /// The profile constants.
    #[inline]
    pub fn config(&self) -> &TrapezoidConfig {
        &self.config
    }

    /// Index of the next step to be produced.
    #[inline]
    pub fn current_step(&self) -> u32 {
        self.index
    }

    /// Delay the next step will use, ignoring a pending zone change.
    #[inline]
    pub fn current_delay(&self) -> u32 {
        self.delay
    }

    /// Steps remaining in the run.
    #[inline]
    pub fn steps_remaining(&self) -> u32 {
        self.config.total_steps.saturating_sub(self.index)
    }

    /// Zone a step index falls in.
    pub fn phase_at(&self, index: u32) -> MotionPhase {
        let config = &self.config;
        if index >= config.total_steps {
            MotionPhase::Complete
        } else if index < config.accel_steps {
            MotionPhase::Accelerating
        } else if index < config.decel_start {
            MotionPhase::Cruising
        } else {
            MotionPhase::Decelerating
        }
    }

    /// Delay used at a step index, or `None` past the end of the run.
    pub fn delay_at(config: TrapezoidConfig, index: u32) -> Option<u32> {
        Self::new(config).nth(index as usize).map(|step| step.delay)
    }

    /// Total blocking time of a full run in time units.
    ///
    /// Each step waits twice, once after each edge.
    pub fn total_duration(config: TrapezoidConfig) -> u64 {
        Self::new(config).map(|step| 2 * step.delay as u64).sum()
    }
}

impl Iterator for TrapezoidProfile {
    type Item = ProfileStep;

    fn next(&mut self) -> Option<ProfileStep> {
        let phase = self.phase_at(self.index);
        if phase == MotionPhase::Complete {
            self.phase = MotionPhase::Complete;
            return None;
        }

        if phase != self.phase {
            self.phase = phase;
            self.phase_counter = 0;
            if phase == MotionPhase::Cruising {
                self.delay = self.config.min_delay;
            }
        }

        let step = ProfileStep {
            index: self.index,
            phase,
            delay: self.delay,
        };

        // The delay change lands after every `cadence`-th step of a ramp.
        match phase {
            MotionPhase::Accelerating => {
                self.phase_counter += 1;
                if self.phase_counter % self.config.cadence.max(1) == 0 {
                    self.delay = self.delay.saturating_sub(1).max(self.config.min_delay);
                }
            }
            MotionPhase::Decelerating => {
                self.phase_counter += 1;
                if self.phase_counter % self.config.cadence.max(1) == 0 {
                    self.delay = (self.delay + 1).min(self.config.start_delay);
                }
            }
            MotionPhase::Cruising | MotionPhase::Complete => {}
        }

        self.index += 1;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.steps_remaining() as usize;
        (remaining, Some(remaining))
    }
}
