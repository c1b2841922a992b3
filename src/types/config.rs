//! Configuration structures for the queue simulator
//!
//! This module contains the simulation configuration structure, the command line
//! interface and the validation logic used to reject bad inputs before a run starts.

use super::{OutputFormat, RateUnit};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Offered load at which a run is reported as close to saturation
pub const NEAR_SATURATION_LOAD: f64 = 0.9;

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mm1-queue-simulator",
    version = "0.1.0",
    about = "M/M/1 Queue Simulator - Discrete-event simulation of a single-server FIFO queue",
    long_about = "Simulates a single-server first-in-first-out queue with Poisson arrivals and exponential service times, advancing logical time in fixed ticks and reporting running state and aggregate statistics.

EXAMPLES:
    # Run with default settings (lambda=3, mu=4 per minute, 60 minutes)
    mm1-queue-simulator

    # Reproducible run
    mm1-queue-simulator --seed 42

    # Rates expressed per hour
    mm1-queue-simulator --arrival-rate 90 --service-rate 120 --rate-unit hours

    # Stream the time series to a JSONL file
    mm1-queue-simulator --trace-output trace.jsonl

    # Use a configuration file
    mm1-queue-simulator --config config.json

    # Summarize a recorded trace
    mm1-queue-simulator --summarize-trace trace.jsonl --horizon 60

    # Generate configuration template
    mm1-queue-simulator --print-config > my-config.json

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Arrival rate (lambda)
    #[arg(
        long,
        help = "Arrival rate lambda (customers per rate unit)",
        long_help = "Mean number of arrivals per rate unit. Must be greater than 0. Default: 3"
    )]
    pub arrival_rate: Option<f64>,

    /// Service rate (mu)
    #[arg(
        long,
        help = "Service rate mu (customers per rate unit)",
        long_help = "Mean number of service completions per rate unit while busy. Must be greater than 0. Default: 4"
    )]
    pub service_rate: Option<f64>,

    /// Unit of the arrival and service rates
    #[arg(
        long,
        help = "Rate unit (minutes or hours)",
        long_help = "Unit in which rates are given. Rates per hour are normalized to per minute. Default: minutes"
    )]
    pub rate_unit: Option<RateUnit>,

    /// Simulated horizon in minutes
    #[arg(long, help = "Simulation horizon in minutes")]
    pub horizon: Option<f64>,

    /// Logical minutes advanced per tick
    #[arg(long, help = "Logical minutes advanced per tick")]
    pub tick_delta: Option<f64>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Number of recent time-series samples kept in memory
    #[arg(long, help = "Number of time-series samples retained in memory")]
    pub trace_capacity: Option<usize>,

    /// Output path for the time-series trace
    #[arg(long, help = "Output path for the time-series JSONL file")]
    pub trace_output: Option<String>,

    /// Output format for the final report
    #[arg(long, help = "Report format (text or json)")]
    pub output_format: Option<OutputFormat>,

    /// Wall-clock pause between ticks
    #[arg(
        long,
        help = "Milliseconds to sleep between ticks",
        long_help = "Wall-clock milliseconds the driver sleeps between ticks, for watching a run unfold. Default: 0 (as fast as possible)"
    )]
    pub tick_interval_ms: Option<u64>,

    /// Directory for rolling log files
    #[arg(long, help = "Also write JSON logs to daily files in this directory")]
    pub log_dir: Option<String>,

    /// Summarize a previously written trace instead of running
    #[arg(
        long,
        value_name = "PATH",
        help = "Summarize a JSONL trace file and exit",
        long_help = "Read a trace written by --trace-output and print its sample count, peak and time-weighted mean number in system. The configured horizon closes the last interval."
    )]
    pub summarize_trace: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Arrival rate (lambda)
    pub arrival_rate: Option<f64>,

    /// Service rate (mu)
    pub service_rate: Option<f64>,

    /// Unit of the arrival and service rates
    pub rate_unit: Option<RateUnit>,

    /// Simulated horizon in minutes
    pub horizon: Option<f64>,

    /// Logical minutes advanced per tick
    pub tick_delta: Option<f64>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Number of recent time-series samples kept in memory
    pub trace_capacity: Option<usize>,

    /// Output path for the time-series trace
    pub trace_output: Option<String>,

    /// Output format for the final report
    pub output_format: Option<OutputFormat>,

    /// Wall-clock pause between ticks
    pub tick_interval_ms: Option<u64>,
}

/// Configuration for an M/M/1 simulation run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    /// Arrival rate (lambda), in `rate_unit`
    pub arrival_rate: f64,

    /// Service rate (mu), in `rate_unit`
    pub service_rate: f64,

    /// Unit of the arrival and service rates
    pub rate_unit: RateUnit,

    /// Simulated horizon in minutes
    pub horizon: f64,

    /// Logical minutes advanced per tick
    pub tick_delta: f64,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Number of recent time-series samples kept in memory
    pub trace_capacity: usize,

    /// Output path for the time-series trace
    pub trace_output: Option<String>,

    /// Output format for the final report
    pub output_format: OutputFormat,

    /// Wall-clock pause between ticks
    pub tick_interval_ms: u64,
}

/// Normalized inputs consumed by the simulation engine
///
/// Rates are per minute and the horizon is in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueueParameters {
    /// Arrival rate (lambda) per minute
    pub arrival_rate: f64,
    /// Service rate (mu) per minute
    pub service_rate: f64,
    /// Logical time at which the run ends
    pub horizon: f64,
}

impl QueueParameters {
    /// Create parameters from rates already expressed per minute
    pub fn new(arrival_rate: f64, service_rate: f64, horizon: f64) -> Self {
        Self { arrival_rate, service_rate, horizon }
    }

    /// Offered load (rho = lambda / mu)
    pub fn offered_load(&self) -> f64 {
        self.arrival_rate / self.service_rate
    }

    /// Whether every parameter is finite and strictly positive
    pub fn is_valid(&self) -> bool {
        [self.arrival_rate, self.service_rate, self.horizon]
            .iter()
            .all(|value| value.is_finite() && *value > 0.0)
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigValidationError {
    /// Arrival rate is not a positive number
    #[error("Arrival rate must be greater than 0, got {0}")]
    InvalidArrivalRate(f64),

    /// Service rate is not a positive number
    #[error("Service rate must be greater than 0, got {0}")]
    InvalidServiceRate(f64),

    /// Horizon is not a positive number
    #[error("Horizon must be greater than 0 minutes, got {0}")]
    InvalidHorizon(f64),

    /// Tick delta is not a positive number
    #[error("Tick delta must be greater than 0 minutes, got {0}")]
    InvalidTickDelta(f64),

    /// Trace buffer would hold nothing
    #[error("Trace capacity must be greater than 0")]
    InvalidTraceCapacity,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            arrival_rate: 3.0,
            service_rate: 4.0,
            rate_unit: RateUnit::PerMinute,
            horizon: 60.0,
            tick_delta: 0.1,
            seed: None,
            trace_capacity: 10_000,
            trace_output: None,
            output_format: OutputFormat::Text,
            tick_interval_ms: 0,
        }
    }
}

impl SimulationConfig {
    /// Create a new configuration from command line arguments and optional config file
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::from_cli_args(args)
    }

    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            arrival_rate: config_file.arrival_rate.unwrap_or(defaults.arrival_rate),
            service_rate: config_file.service_rate.unwrap_or(defaults.service_rate),
            rate_unit: config_file.rate_unit.unwrap_or(defaults.rate_unit),
            horizon: config_file.horizon.unwrap_or(defaults.horizon),
            tick_delta: config_file.tick_delta.unwrap_or(defaults.tick_delta),
            seed: config_file.seed.or(defaults.seed),
            trace_capacity: config_file.trace_capacity.unwrap_or(defaults.trace_capacity),
            trace_output: config_file.trace_output.or(defaults.trace_output),
            output_format: config_file.output_format.unwrap_or(defaults.output_format),
            tick_interval_ms: config_file.tick_interval_ms.unwrap_or(defaults.tick_interval_ms),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.arrival_rate {
            config.arrival_rate = value;
        }
        if let Some(value) = args.service_rate {
            config.service_rate = value;
        }
        if let Some(value) = args.rate_unit {
            config.rate_unit = value;
        }
        if let Some(value) = args.horizon {
            config.horizon = value;
        }
        if let Some(value) = args.tick_delta {
            config.tick_delta = value;
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = args.trace_capacity {
            config.trace_capacity = value;
        }
        if let Some(value) = args.trace_output {
            config.trace_output = Some(value);
        }
        if let Some(value) = args.output_format {
            config.output_format = value;
        }
        if let Some(value) = args.tick_interval_ms {
            config.tick_interval_ms = value;
        }
    }

    /// Serialize the configuration as pretty JSON
    pub fn print_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !is_positive(self.arrival_rate) {
            return Err(ConfigValidationError::InvalidArrivalRate(self.arrival_rate));
        }
        if !is_positive(self.service_rate) {
            return Err(ConfigValidationError::InvalidServiceRate(self.service_rate));
        }
        if !is_positive(self.horizon) {
            return Err(ConfigValidationError::InvalidHorizon(self.horizon));
        }
        if !is_positive(self.tick_delta) {
            return Err(ConfigValidationError::InvalidTickDelta(self.tick_delta));
        }
        if self.trace_capacity == 0 {
            return Err(ConfigValidationError::InvalidTraceCapacity);
        }
        Ok(())
    }

    /// Arrival rate normalized to customers per minute
    pub fn arrival_rate_per_minute(&self) -> f64 {
        self.rate_unit.to_per_minute(self.arrival_rate)
    }

    /// Service rate normalized to customers per minute
    pub fn service_rate_per_minute(&self) -> f64 {
        self.rate_unit.to_per_minute(self.service_rate)
    }

    /// Normalized engine inputs
    pub fn queue_parameters(&self) -> QueueParameters {
        QueueParameters::new(
            self.arrival_rate_per_minute(),
            self.service_rate_per_minute(),
            self.horizon,
        )
    }

    /// Offered load (rho); the rate unit cancels out
    pub fn offered_load(&self) -> f64 {
        self.arrival_rate / self.service_rate
    }

    /// Number of ticks needed to reach the horizon
    pub fn tick_count(&self) -> u64 {
        (self.horizon / self.tick_delta).ceil() as u64
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
