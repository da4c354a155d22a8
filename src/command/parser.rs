//! Command line parsing.
//!
//! A line is a verb followed by whitespace-separated arguments in fixed
//! order. Arguments past the ones a command takes are ignored.

use core::str::SplitWhitespace;

use crate::error::{CommandError, Error, Result};

/// One parsed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// One-time peripheral configuration.
    Init,
    /// Wake the driver and set the output-enable line (`0` enables motion).
    Enable {
        /// Raw enable argument.
        state: u32,
    },
    /// Fixed-rate blocking steps.
    Step {
        /// Signed pulse count.
        steps: i32,
        /// Wait after every toggle, in time units.
        delay: u32,
    },
    /// Arm the periodic rate generator.
    StepTimer {
        /// Signed toggle budget.
        step_budget: i32,
        /// Base periods per toggle.
        rate_divisor: u32,
    },
    /// Run the trapezoidal profile.
    StepTrapezoid,
    /// Stop the periodic timer.
    StepStop,
    /// List commands.
    Help,
}

/// Which command a verb selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// `init`
    Init,
    /// `enable`
    Enable,
    /// `step`
    Step,
    /// `step-timer`
    StepTimer,
    /// `step-trapezoid`
    StepTrapezoid,
    /// `step-stop`
    StepStop,
    /// `help`
    Help,
}

/// Static description of a command verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandInfo {
    /// Command selected by this verb.
    pub kind: CommandKind,
    /// Primary verb.
    pub name: &'static str,
    /// Legacy verb accepted as well.
    pub alias: Option<&'static str>,
    /// Argument synopsis.
    pub usage: &'static str,
    /// One-line description.
    pub help: &'static str,
}

impl CommandInfo {
    /// Whether `verb` names this command.
    pub fn matches(&self, verb: &str) -> bool {
        self.name == verb || self.alias == Some(verb)
    }
}

/// Every command verb, in help order.
pub const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        kind: CommandKind::Init,
        name: "init",
        alias: Some("stepinit"),
        usage: "",
        help: "Initialize driver peripherals",
    },
    CommandInfo {
        kind: CommandKind::Enable,
        name: "enable",
        alias: Some("stepenable"),
        usage: "<0/1>",
        help: "Enable (0) or disable (1) the driver outputs",
    },
    CommandInfo {
        kind: CommandKind::Step,
        name: "step",
        alias: None,
        usage: "<step> <delay>",
        help: "Step at a fixed rate, blocking",
    },
    CommandInfo {
        kind: CommandKind::StepTimer,
        name: "step-timer",
        alias: Some("steptim"),
        usage: "<step> <delay>",
        help: "Step from the periodic timer, one toggle every <delay> ticks",
    },
    CommandInfo {
        kind: CommandKind::StepTrapezoid,
        name: "step-trapezoid",
        alias: Some("steptrapeze"),
        usage: "",
        help: "Step in a trapezoidal profile",
    },
    CommandInfo {
        kind: CommandKind::StepStop,
        name: "step-stop",
        alias: Some("stepstop"),
        usage: "",
        help: "Stop the periodic timer",
    },
    CommandInfo {
        kind: CommandKind::Help,
        name: "help",
        alias: None,
        usage: "",
        help: "List commands",
    },
];

/// Look up a verb in [`COMMANDS`].
pub fn lookup(verb: &str) -> Option<&'static CommandInfo> {
    COMMANDS.iter().find(|info| info.matches(verb))
}

impl Command {
    /// Parse one command line.
    ///
    /// Returns `Ok(None)` for a blank line.
    ///
    /// # Errors
    ///
    /// - [`CommandError::UnknownCommand`] for an unrecognised verb
    /// - [`CommandError::MissingArgument`] when an argument is absent
    /// - [`CommandError::InvalidArgument`] when an argument is not a number
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut args = Args(line.split_whitespace());
        let verb = match args.0.next() {
            Some(verb) => verb,
            None => return Ok(None),
        };

        let info = lookup(verb).ok_or_else(|| {
            let mut name = heapless::String::new();
            for c in verb.chars() {
                if name.push(c).is_err() {
                    break;
                }
            }
            Error::Command(CommandError::UnknownCommand(name))
        })?;

        let command = match info.kind {
            CommandKind::Init => Command::Init,
            CommandKind::Enable => Command::Enable {
                state: args.next_u32("state")?,
            },
            CommandKind::Step => Command::Step {
                steps: args.next_i32("step")?,
                delay: args.next_u32("delay")?,
            },
            // The divisor keeps the console's historical argument name.
            CommandKind::StepTimer => Command::StepTimer {
                step_budget: args.next_i32("step")?,
                rate_divisor: args.next_u32("delay")?,
            },
            CommandKind::StepTrapezoid => Command::StepTrapezoid,
            CommandKind::StepStop => Command::StepStop,
            CommandKind::Help => Command::Help,
        };

        Ok(Some(command))
    }

    /// Which command this is.
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Init => CommandKind::Init,
            Command::Enable { .. } => CommandKind::Enable,
            Command::Step { .. } => CommandKind::Step,
            Command::StepTimer { .. } => CommandKind::StepTimer,
            Command::StepTrapezoid => CommandKind::StepTrapezoid,
            Command::StepStop => CommandKind::StepStop,
            Command::Help => CommandKind::Help,
        }
    }

    /// Primary verb of this command.
    pub fn name(&self) -> &'static str {
        let kind = self.kind();
        COMMANDS
            .iter()
            .find(|info| info.kind == kind)
            .map_or("?", |info| info.name)
    }

    /// Whether this command produces motion.
    pub fn is_motion(&self) -> bool {
        matches!(
            self,
            Command::Step { .. } | Command::StepTimer { .. } | Command::StepTrapezoid
        )
    }
}

struct Args<'a>(SplitWhitespace<'a>);

impl Args<'_> {
    fn next_i32(&mut self, name: &'static str) -> Result<i32> {
        let token = self.0.next().ok_or(CommandError::MissingArgument(name))?;
        let value = token
            .parse::<i32>()
            .map_err(|_| CommandError::InvalidArgument(name))?;
        Ok(value)
    }

    fn next_u32(&mut self, name: &'static str) -> Result<u32> {
        let token = self.0.next().ok_or(CommandError::MissingArgument(name))?;
        let parsed = match token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
        {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => token.parse::<u32>(),
        };
        let value = parsed.map_err(|_| CommandError::InvalidArgument(name))?;
        Ok(value)
    }
}
