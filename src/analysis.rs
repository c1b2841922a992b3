//! Offline analysis of a recorded time-series trace
//!
//! Reads the JSONL file written by [`JsonlTraceWriter`] back into samples and
//! summarizes the number-in-system curve.
//!
//! [`JsonlTraceWriter`]: crate::simulation::JsonlTraceWriter

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::simulation::{SimulationError, SimulationResult, TimeSample};

/// Summary of a number-in-system trace
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceSummary {
    /// Number of samples in the trace
    pub sample_count: usize,
    /// Time of the first sample
    pub first_time: f64,
    /// Time of the last sample
    pub last_time: f64,
    /// Largest number in system seen in any sample
    pub peak_customers_in_system: usize,
    /// Time-weighted mean number in system over `[first_time, horizon]`
    pub mean_customers_in_system: f64,
}

/// Load a JSONL trace file
pub fn load_trace<P: AsRef<Path>>(path: P) -> SimulationResult<Vec<TimeSample>> {
    let file = File::open(path.as_ref())?;
    read_trace(BufReader::new(file))
}

/// Parse JSONL samples from any buffered reader
///
/// Blank lines are skipped. Samples must be in non-decreasing time order.
pub fn read_trace<R: BufRead>(reader: R) -> SimulationResult<Vec<TimeSample>> {
    let mut samples: Vec<TimeSample> = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let sample: TimeSample = serde_json::from_str(&line).map_err(|e| {
            SimulationError::trace_error(format!("line {}: {}", index + 1, e))
        })?;
        if let Some(previous) = samples.last() {
            if sample.time < previous.time {
                return Err(SimulationError::trace_error(format!(
                    "line {}: time {} goes backwards from {}",
                    index + 1,
                    sample.time,
                    previous.time
                )));
            }
        }
        samples.push(sample);
    }

    Ok(samples)
}

/// Summarize a trace whose run ended at `horizon`
///
/// Each sample's count holds until the next sample; the last one holds until
/// the horizon. Returns `None` for an empty trace.
pub fn summarize_trace(samples: &[TimeSample], horizon: f64) -> Option<TraceSummary> {
    let first = samples.first()?;
    let last = samples.last()?;

    let end = horizon.max(last.time);
    let span = end - first.time;

    let area: f64 = samples
        .iter()
        .zip(samples.iter().skip(1).map(|s| s.time).chain(std::iter::once(end)))
        .map(|(sample, until)| sample.customers_in_system as f64 * (until - sample.time))
        .sum();

    let mean = if span > 0.0 { area / span } else { last.customers_in_system as f64 };

    Some(TraceSummary {
        sample_count: samples.len(),
        first_time: first.time,
        last_time: last.time,
        peak_customers_in_system: samples.iter().map(|s| s.customers_in_system).max().unwrap_or(0),
        mean_customers_in_system: mean,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_trace_skips_blank_lines() {
        let input = "{\"time\":0.5,\"customers_in_system\":1}\n\n{\"time\":1.0,\"customers_in_system\":0}\n";
        let samples = read_trace(Cursor::new(input)).unwrap();
        assert_eq!(samples, vec![TimeSample::new(0.5, 1), TimeSample::new(1.0, 0)]);
    }

    #[test]
    fn test_read_trace_reports_line_number() {
        let input = "{\"time\":0.5,\"customers_in_system\":1}\nnot json\n";
        let err = read_trace(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, SimulationError::TraceError(_)));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_read_trace_rejects_time_going_backwards() {
        let input = "{\"time\":2.0,\"customers_in_system\":1}\n{\"time\":1.0,\"customers_in_system\":0}\n";
        assert!(read_trace(Cursor::new(input)).is_err());
    }

    #[test]
    fn test_summarize_time_weighted_mean() {
        // 1 in system on [1, 3), 2 on [3, 4), 0 on [4, 6]
        let samples = vec![TimeSample::new(1.0, 1), TimeSample::new(3.0, 2), TimeSample::new(4.0, 0)];
        let summary = summarize_trace(&samples, 6.0).unwrap();

        assert_eq!(summary.sample_count, 3);
        assert_eq!(summary.peak_customers_in_system, 2);
        assert!((summary.mean_customers_in_system - 4.0 / 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_summarize_empty_trace() {
        assert!(summarize_trace(&[], 10.0).is_none());
    }

    #[test]
    fn test_summarize_single_sample_at_horizon() {
        let summary = summarize_trace(&[TimeSample::new(5.0, 3)], 5.0).unwrap();
        assert_eq!(summary.mean_customers_in_system, 3.0);
    }
}
