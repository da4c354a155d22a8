//! Periodic rate generator states.

/// State of the periodic rate generator.
///
/// `Armed` persists after the toggle budget is spent: the interrupt keeps
/// firing and dividing until the timer is stopped or the generator re-armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GeneratorState {
    /// Timer stopped; no toggles will be produced.
    #[default]
    Idle,
    /// Timer running against a loaded program.
    Armed,
}

impl GeneratorState {
    /// Get the state name as a static string.
    pub fn name(self) -> &'static str {
        match self {
            GeneratorState::Idle => "Idle",
            GeneratorState::Armed => "Armed",
        }
    }
}
