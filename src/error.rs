//! Error types for stepper-pulse.
//!
//! Provides unified error handling across configuration, pulse generation and
//! the command surface.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-pulse operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Driver or pulse generation error
    Motor(MotorError),
    /// Command parsing or dispatch error
    Command(CommandError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// A required component was not supplied to the builder
    MissingComponent(&'static str),
    /// Profile cadence must be at least one step
    InvalidCadence(u32),
    /// Minimum delay must be at least one time unit
    InvalidMinDelay(u32),
    /// Start delay must not be below the minimum delay
    InvalidStartDelay {
        /// Configured start delay
        start: u32,
        /// Configured minimum delay
        floor: u32,
    },
    /// Zone boundaries must satisfy `accel_steps <= decel_start <= total_steps`
    InvalidZones {
        /// End of the acceleration zone
        accel_steps: u32,
        /// Start of the deceleration zone
        decel_start: u32,
        /// Total profile length
        total_steps: u32,
    },
    /// Timer base period must be non-zero
    InvalidBasePeriod(u32),
    /// Current reference exceeds the 12-bit DAC range
    InvalidCurrentReference(u16),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Driver and pulse generation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorError {
    /// Pin operation failed
    PinError,
    /// Driver output-enable line reports disabled; nothing was emitted
    DriverDisabled,
    /// A collaborator peripheral failed to configure
    PeripheralInit,
    /// Motion requested before peripherals were initialized
    NotInitialized,
    /// Rate divisor must be non-zero
    InvalidRateDivisor(u32),
    /// Driver support line or current reference could not be written
    DriverControl,
}

/// Command surface errors.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    /// A required argument was not supplied
    MissingArgument(&'static str),
    /// An argument could not be parsed as a number
    InvalidArgument(&'static str),
    /// Command verb is not recognised
    UnknownCommand(heapless::String<16>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Command(e) => write!(f, "Command error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::MissingComponent(name) => write!(f, "{} is required", name),
            ConfigError::InvalidCadence(v) => write!(f, "Invalid cadence: {}. Must be > 0", v),
            ConfigError::InvalidMinDelay(v) => write!(f, "Invalid minimum delay: {}. Must be > 0", v),
            ConfigError::InvalidStartDelay { start, floor } => {
                write!(f, "Invalid start delay: {} is below minimum delay {}", start, floor)
            }
            ConfigError::InvalidZones {
                accel_steps,
                decel_start,
                total_steps,
            } => write!(
                f,
                "Invalid profile zones: accel end {}, decel start {}, total {}",
                accel_steps, decel_start, total_steps
            ),
            ConfigError::InvalidBasePeriod(v) => write!(f, "Invalid base period: {} us. Must be > 0", v),
            ConfigError::InvalidCurrentReference(v) => {
                write!(f, "Invalid current reference: {}. Must be 0-4095", v)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
            MotorError::DriverDisabled => write!(f, "Driver not enabled"),
            MotorError::PeripheralInit => write!(f, "Peripheral initialization failed"),
            MotorError::NotInitialized => write!(f, "Peripherals not initialized"),
            MotorError::InvalidRateDivisor(v) => write!(f, "Invalid rate divisor: {}. Must be > 0", v),
            MotorError::DriverControl => write!(f, "Driver control write failed"),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::MissingArgument(name) => write!(f, "Missing {} value", name),
            CommandError::InvalidArgument(name) => write!(f, "Invalid {} value", name),
            CommandError::UnknownCommand(verb) => write!(f, "Unknown command '{}'", verb),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Error::Command(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for CommandError {}
