//! Error types and handling
//!
//! Recoverable conditions only: bad configuration, lifecycle misuse by the
//! driver, and trace output failures. Broken engine invariants are not errors;
//! they panic where they are detected.

use thiserror::Error;

use crate::types::{ConfigError, ConfigValidationError, RunPhase};

/// Errors that can occur during simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(String),

    /// A lifecycle command was issued in a phase that does not accept it
    #[error("Cannot {command} while the run is {phase}")]
    InvalidCommand {
        /// The rejected command
        command: &'static str,
        /// Phase the run was in
        phase: RunPhase,
    },

    /// Tick delta was not a finite positive number
    #[error("Tick delta must be finite and greater than 0, got {0}")]
    InvalidTickDelta(f64),

    /// Trace output failed
    #[error("Trace error: {0}")]
    TraceError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<ConfigValidationError> for SimulationError {
    fn from(error: ConfigValidationError) -> Self {
        SimulationError::ConfigurationError(error.to_string())
    }
}

impl From<ConfigError> for SimulationError {
    fn from(error: ConfigError) -> Self {
        SimulationError::ConfigurationError(error.to_string())
    }
}

impl SimulationError {
    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create an invalid command error
    pub fn invalid_command(command: &'static str, phase: RunPhase) -> Self {
        Self::InvalidCommand { command, phase }
    }

    /// Create a trace error
    pub fn trace_error(msg: impl Into<String>) -> Self {
        Self::TraceError(msg.into())
    }

    /// Check if this is a recoverable error
    ///
    /// A driver may correct a rejected command or tick delta and carry on with
    /// the same run; everything else ends it.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimulationError::ConfigurationError(_) => false,
            SimulationError::InvalidCommand { .. } => true,
            SimulationError::InvalidTickDelta(_) => true,
            SimulationError::TraceError(_) => false,
            SimulationError::IoError(_) => false,
            SimulationError::SerializationError(_) => false,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::InvalidCommand { .. } => "Lifecycle",
            SimulationError::InvalidTickDelta(_) => "Lifecycle",
            SimulationError::TraceError(_) => "Trace",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_creation() {
        let config_error = SimulationError::configuration_error("Invalid config");
        assert!(matches!(config_error, SimulationError::ConfigurationError(_)));
        assert_eq!(config_error.to_string(), "Configuration validation failed: Invalid config");

        let command_error = SimulationError::invalid_command("tick", RunPhase::Paused);
        assert_eq!(command_error.to_string(), "Cannot tick while the run is Paused");
    }

    #[test]
    fn test_error_from_validation_error() {
        let error: SimulationError = ConfigValidationError::InvalidHorizon(0.0).into();
        assert!(matches!(error, SimulationError::ConfigurationError(_)));
        assert!(error.to_string().contains("Horizon must be greater than 0"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let sim_error: SimulationError = io_error.into();
        assert!(matches!(sim_error, SimulationError::IoError(_)));
        assert!(!sim_error.is_recoverable());
    }

    #[test]
    fn test_error_recoverability() {
        assert!(!SimulationError::configuration_error("bad").is_recoverable());
        assert!(SimulationError::invalid_command("pause", RunPhase::Idle).is_recoverable());
        assert!(SimulationError::InvalidTickDelta(-1.0).is_recoverable());
        assert!(!SimulationError::trace_error("disk full").is_recoverable());
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(SimulationError::configuration_error("x").category(), "Configuration");
        assert_eq!(SimulationError::invalid_command("start", RunPhase::Complete).category(), "Lifecycle");
        assert_eq!(SimulationError::InvalidTickDelta(0.0).category(), "Lifecycle");
        assert_eq!(SimulationError::trace_error("x").category(), "Trace");
    }

    #[test]
    fn test_simulation_result_type() {
        let success: SimulationResult<i32> = Ok(42);
        assert!(success.is_ok());

        let failure: SimulationResult<i32> = Err(SimulationError::configuration_error("Test"));
        assert!(failure.is_err());
    }
}
