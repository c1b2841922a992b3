//! Enumeration types for the queue simulator
//!
//! This module contains the enumeration types used throughout the simulation system:
//! event kinds, run lifecycle phases, rate units and report output formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of a scheduled simulation event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A customer enters the system
    Arrival,
    /// A customer finishes service and leaves the system
    Departure,
}

impl EventKind {
    /// Rank used to order events that share the exact same time.
    ///
    /// Departures rank first so the server is freed before an arrival at the
    /// same instant is routed.
    pub fn tie_rank(self) -> u8 {
        match self {
            EventKind::Departure => 0,
            EventKind::Arrival => 1,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Arrival => write!(f, "Arrival"),
            EventKind::Departure => write!(f, "Departure"),
        }
    }
}

/// Lifecycle phase of a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunPhase {
    /// Not started, or reset
    Idle,
    /// Accepting ticks
    Running,
    /// Suspended by the driver; state is retained
    Paused,
    /// Logical time reached the horizon
    Complete,
}

impl RunPhase {
    /// Whether the driver may issue `tick` in this phase
    pub fn accepts_ticks(self) -> bool {
        matches!(self, RunPhase::Running)
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunPhase::Idle => write!(f, "Idle"),
            RunPhase::Running => write!(f, "Running"),
            RunPhase::Paused => write!(f, "Paused"),
            RunPhase::Complete => write!(f, "Complete"),
        }
    }
}

/// Unit in which arrival and service rates are entered
///
/// The engine always works in minutes; rates given per hour are normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RateUnit {
    /// Customers per minute
    #[default]
    PerMinute,
    /// Customers per hour
    PerHour,
}

impl RateUnit {
    /// Convert a rate in this unit to customers per minute
    pub fn to_per_minute(self, rate: f64) -> f64 {
        match self {
            RateUnit::PerMinute => rate,
            RateUnit::PerHour => rate / 60.0,
        }
    }
}

impl fmt::Display for RateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateUnit::PerMinute => write!(f, "customers/min"),
            RateUnit::PerHour => write!(f, "customers/hour"),
        }
    }
}

impl FromStr for RateUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minute" | "minutes" | "per_minute" | "per-minute" | "min" => Ok(RateUnit::PerMinute),
            "hour" | "hours" | "per_hour" | "per-hour" | "h" => Ok(RateUnit::PerHour),
            _ => Err(format!("Unknown rate unit: {}", s)),
        }
    }
}

/// Output formats for the final run report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human readable summary
    #[default]
    Text,
    /// JSON format for structured data
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "Text"),
            OutputFormat::Json => write!(f, "JSON"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_departure_ranks_before_arrival() {
        assert!(EventKind::Departure.tie_rank() < EventKind::Arrival.tie_rank());
    }

    #[test]
    fn test_event_kind_display() {
        assert_eq!(format!("{}", EventKind::Arrival), "Arrival");
        assert_eq!(format!("{}", EventKind::Departure), "Departure");
    }

    #[test]
    fn test_only_running_accepts_ticks() {
        assert!(RunPhase::Running.accepts_ticks());
        assert!(!RunPhase::Idle.accepts_ticks());
        assert!(!RunPhase::Paused.accepts_ticks());
        assert!(!RunPhase::Complete.accepts_ticks());
    }

    #[test]
    fn test_rate_unit_normalization() {
        assert_eq!(RateUnit::PerMinute.to_per_minute(3.0), 3.0);
        assert_eq!(RateUnit::PerHour.to_per_minute(120.0), 2.0);
    }

    #[test]
    fn test_rate_unit_from_str() {
        assert_eq!("minutes".parse::<RateUnit>().unwrap(), RateUnit::PerMinute);
        assert_eq!("HOURS".parse::<RateUnit>().unwrap(), RateUnit::PerHour);
        assert_eq!("per-hour".parse::<RateUnit>().unwrap(), RateUnit::PerHour);
        assert!("fortnight".parse::<RateUnit>().is_err());
    }

    #[test]
    fn test_rate_unit_serde_names() {
        assert_eq!(serde_json::to_string(&RateUnit::PerHour).unwrap(), "\"per_hour\"");
        let unit: RateUnit = serde_json::from_str("\"per_minute\"").unwrap();
        assert_eq!(unit, RateUnit::PerMinute);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("Text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("csv".parse::<OutputFormat>().is_err());
    }
}
