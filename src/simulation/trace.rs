//! Time-series trace of customers in system
//!
//! One sample is produced per processed event. The controller keeps only a
//! bounded window of recent samples in memory; every sample is also handed back
//! to the driver in the tick report so it can be streamed to a [`TraceSink`]
//! such as [`JsonlTraceWriter`] for long-horizon runs.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::io::Write;

use crate::simulation::SimulationResult;

/// Number in system right after an event was applied
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSample {
    /// Event time (minutes)
    pub time: f64,
    /// Customers in service plus waiting
    pub customers_in_system: usize,
}

impl TimeSample {
    /// Create a new sample
    pub fn new(time: f64, customers_in_system: usize) -> Self {
        Self { time, customers_in_system }
    }
}

/// Destination for time-series samples
pub trait TraceSink {
    /// Accept the next sample; samples arrive in non-decreasing time order
    fn record(&mut self, sample: &TimeSample) -> SimulationResult<()>;

    /// Flush any buffered output
    fn flush(&mut self) -> SimulationResult<()> {
        Ok(())
    }
}

/// Ring buffer holding the most recent samples
#[derive(Debug, Clone)]
pub struct TimeSeries {
    samples: VecDeque<TimeSample>,
    capacity: usize,
    total_recorded: u64,
}

impl TimeSeries {
    /// Create a buffer retaining at most `capacity` samples
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "time series capacity must be positive");
        Self {
            samples: VecDeque::with_capacity(capacity.min(4096)),
            capacity,
            total_recorded: 0,
        }
    }

    /// Append a sample, evicting the oldest when full
    pub fn push(&mut self, sample: TimeSample) {
        if let Some(last) = self.samples.back() {
            debug_assert!(sample.time >= last.time, "time series must not go backwards");
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        self.total_recorded += 1;
    }

    /// Retained samples, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &TimeSample> {
        self.samples.iter()
    }

    /// Retained samples as a vector
    pub fn to_vec(&self) -> Vec<TimeSample> {
        self.samples.iter().copied().collect()
    }

    /// Most recent sample
    pub fn latest(&self) -> Option<&TimeSample> {
        self.samples.back()
    }

    /// Number of retained samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether nothing is retained
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Maximum number of retained samples
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Samples recorded since the last clear, retained or not
    pub fn total_recorded(&self) -> u64 {
        self.total_recorded
    }

    /// Samples evicted to respect the capacity
    pub fn evicted(&self) -> u64 {
        self.total_recorded - self.samples.len() as u64
    }

    /// Forget every sample
    pub fn clear(&mut self) {
        self.samples.clear();
        self.total_recorded = 0;
    }
}

impl TraceSink for TimeSeries {
    fn record(&mut self, sample: &TimeSample) -> SimulationResult<()> {
        self.push(*sample);
        Ok(())
    }
}

/// Writes each sample as one JSON object per line
#[derive(Debug)]
pub struct JsonlTraceWriter<W: Write> {
    writer: W,
    written: u64,
}

impl<W: Write> JsonlTraceWriter<W> {
    /// Wrap a writer; callers usually pass a `BufWriter`
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of samples written
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Unwrap the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for JsonlTraceWriter<W> {
    fn record(&mut self, sample: &TimeSample) -> SimulationResult<()> {
        serde_json::to_writer(&mut self.writer, sample)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn flush(&mut self) -> SimulationResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_series_evicts_oldest() {
        let mut series = TimeSeries::with_capacity(3);
        for i in 0..5 {
            series.push(TimeSample::new(i as f64, i));
        }

        assert_eq!(series.len(), 3);
        assert_eq!(series.total_recorded(), 5);
        assert_eq!(series.evicted(), 2);
        let times: Vec<f64> = series.iter().map(|s| s.time).collect();
        assert_eq!(times, vec![2.0, 3.0, 4.0]);
        assert_eq!(series.latest().map(|s| s.customers_in_system), Some(4));
    }

    #[test]
    fn test_time_series_clear() {
        let mut series = TimeSeries::with_capacity(2);
        series.push(TimeSample::new(1.0, 1));
        series.clear();
        assert!(series.is_empty());
        assert_eq!(series.total_recorded(), 0);
        assert_eq!(series.capacity(), 2);
    }

    #[test]
    #[should_panic(expected = "capacity must be positive")]
    fn test_zero_capacity_panics() {
        TimeSeries::with_capacity(0);
    }

    #[test]
    fn test_jsonl_writer_output() {
        let mut writer = JsonlTraceWriter::new(Vec::new());
        writer.record(&TimeSample::new(0.5, 1)).unwrap();
        writer.record(&TimeSample::new(1.25, 0)).unwrap();
        writer.flush().unwrap();
        assert_eq!(writer.written(), 2);

        let output = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"{"time":0.5,"customers_in_system":1}"#);

        let parsed: TimeSample = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed, TimeSample::new(1.25, 0));
    }

    #[test]
    fn test_time_series_as_sink() {
        let mut series = TimeSeries::with_capacity(8);
        let sink: &mut dyn TraceSink = &mut series;
        sink.record(&TimeSample::new(0.1, 1)).unwrap();
        sink.flush().unwrap();
        assert_eq!(series.len(), 1);
    }
}
