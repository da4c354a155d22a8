//! Fixed-rate step commands.

use super::profile::Direction;

/// One request to the immediate stepper.
///
/// The sign of `step_count` selects the direction and its magnitude is the
/// number of full pulses. Each pulse is two toggles, which produces a whole
/// pulse whatever level the step line rested at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepCommand {
    /// Signed pulse count.
    pub step_count: i32,
    /// Wait after every toggle, in time units.
    pub delay: u32,
}

impl StepCommand {
    /// Create a step command.
    #[inline]
    pub fn new(step_count: i32, delay: u32) -> Self {
        Self { step_count, delay }
    }

    /// Direction implied by the sign of the step count.
    #[inline]
    pub fn direction(&self) -> Direction {
        Direction::from_steps(self.step_count)
    }

    /// Number of full pulses.
    #[inline]
    pub fn pulses(&self) -> u32 {
        self.step_count.unsigned_abs()
    }

    /// Number of step line toggles.
    #[inline]
    pub fn toggles(&self) -> u64 {
        2 * self.pulses() as u64
    }

    /// Total blocking time in time units.
    #[inline]
    pub fn duration(&self) -> u64 {
        self.toggles() * self.delay as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_shape() {
        let cmd = StepCommand::new(-5, 2);
        assert_eq!(cmd.direction(), Direction::CounterClockwise);
        assert_eq!(cmd.pulses(), 5);
        assert_eq!(cmd.toggles(), 10);
        assert_eq!(cmd.duration(), 20);
    }

    #[test]
    fn test_extreme_counts() {
        assert_eq!(StepCommand::new(i32::MIN, 1).pulses(), 1 << 31);
        assert_eq!(StepCommand::new(i32::MIN, 1).toggles(), 1 << 32);
        assert_eq!(StepCommand::new(0, 7).toggles(), 0);
    }
}
