//! Tests for CLI argument parsing functionality
//!
//! These tests verify that command line arguments are properly parsed and
//! merged over a configuration file and the defaults.

use mm1_queue_simulator::types::config::{CliArgs, SimulationConfig};
use mm1_queue_simulator::types::{OutputFormat, RateUnit};
use clap::Parser;
use std::io::Write;
use tempfile::Builder;

/// Test that no arguments leaves every override unset
#[test]
fn test_no_arguments() {
    let args = CliArgs::try_parse_from(["test"]).unwrap();
    assert!(args.config.is_none());
    assert!(args.arrival_rate.is_none());
    assert!(args.service_rate.is_none());
    assert!(args.horizon.is_none());
    assert!(args.seed.is_none());
    assert!(!args.verbose);
    assert!(!args.debug);
    assert!(!args.dry_run);
    assert!(!args.print_config);

    let config = SimulationConfig::from_cli_args(args).unwrap();
    assert_eq!(config, SimulationConfig::default());
}

/// Test parsing of the queue parameters
#[test]
fn test_queue_parameter_arguments() {
    let args = CliArgs::try_parse_from([
        "test",
        "--arrival-rate",
        "5",
        "--service-rate",
        "4.5",
        "--horizon",
        "200",
        "--tick-delta",
        "0.5",
        "--seed",
        "42",
    ])
    .unwrap();

    assert_eq!(args.arrival_rate, Some(5.0));
    assert_eq!(args.service_rate, Some(4.5));
    assert_eq!(args.horizon, Some(200.0));
    assert_eq!(args.tick_delta, Some(0.5));
    assert_eq!(args.seed, Some(42));

    let config = SimulationConfig::from_cli_args(args).unwrap();
    assert_eq!(config.arrival_rate, 5.0);
    assert_eq!(config.tick_count(), 400);
    assert!(config.validate().is_ok());
}

/// Test parsing of rate units and output formats
#[test]
fn test_enum_arguments() {
    let args = CliArgs::try_parse_from(["test", "--rate-unit", "hours", "--output-format", "json"]).unwrap();
    assert_eq!(args.rate_unit, Some(RateUnit::PerHour));
    assert_eq!(args.output_format, Some(OutputFormat::Json));

    let args = CliArgs::try_parse_from(["test", "--rate-unit", "minutes"]).unwrap();
    assert_eq!(args.rate_unit, Some(RateUnit::PerMinute));

    assert!(CliArgs::try_parse_from(["test", "--rate-unit", "fortnights"]).is_err());
    assert!(CliArgs::try_parse_from(["test", "--output-format", "xml"]).is_err());
}

/// Test malformed numbers are rejected by the parser
#[test]
fn test_invalid_numbers() {
    assert!(CliArgs::try_parse_from(["test", "--arrival-rate", "fast"]).is_err());
    assert!(CliArgs::try_parse_from(["test", "--seed", "-1"]).is_err());
    assert!(CliArgs::try_parse_from(["test", "--trace-capacity", "1.5"]).is_err());
}

/// Test out-of-range values parse but fail validation
#[test]
fn test_validation_after_parsing() {
    let args = CliArgs::try_parse_from(["test", "--service-rate", "0"]).unwrap();
    let config = SimulationConfig::from_cli_args(args).unwrap();
    assert!(config.validate().is_err());

    let args = CliArgs::try_parse_from(["test", "--horizon=-5"]).unwrap();
    let config = SimulationConfig::from_cli_args(args).unwrap();
    assert!(config.validate().is_err());
}

/// Test flags and paths
#[test]
fn test_flags_and_paths() {
    let args = CliArgs::try_parse_from([
        "test",
        "-v",
        "--dry-run",
        "--trace-output",
        "trace.jsonl",
        "--log-dir",
        "logs",
        "--summarize-trace",
        "old.jsonl",
        "--tick-interval-ms",
        "50",
    ])
    .unwrap();

    assert!(args.verbose);
    assert!(args.dry_run);
    assert_eq!(args.trace_output.as_deref(), Some("trace.jsonl"));
    assert_eq!(args.log_dir.as_deref(), Some("logs"));
    assert_eq!(args.summarize_trace.as_deref(), Some("old.jsonl"));
    assert_eq!(args.tick_interval_ms, Some(50));
}

/// Test CLI values take precedence over the configuration file
#[test]
fn test_cli_overrides_config_file() {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    writeln!(
        file,
        r#"{{ "arrival_rate": 2.0, "service_rate": 6.0, "rate_unit": "per_hour", "horizon": 120.0 }}"#
    )
    .unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let args = CliArgs::try_parse_from(["test", "--config", &path, "--arrival-rate", "3"]).unwrap();
    let config = SimulationConfig::from_cli_args(args).unwrap();

    assert_eq!(config.arrival_rate, 3.0);
    assert_eq!(config.service_rate, 6.0);
    assert_eq!(config.rate_unit, RateUnit::PerHour);
    assert_eq!(config.horizon, 120.0);
    // Unset keys fall back to defaults
    assert_eq!(config.tick_delta, SimulationConfig::default().tick_delta);
}

/// Test a missing configuration file is reported
#[test]
fn test_missing_config_file() {
    let args = CliArgs::try_parse_from(["test", "--config", "does-not-exist.json"]).unwrap();
    assert!(SimulationConfig::from_cli_args(args).is_err());
}
