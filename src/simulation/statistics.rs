//! Statistics collection and reporting
//!
//! Running totals only. Averages are derived on demand from the sums so there is
//! a single source of truth for every figure.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cumulative statistics of one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Customers whose arrival event has been processed
    pub total_arrived: u64,
    /// Customers whose departure event has been processed
    pub total_served: u64,
    /// Sum of queue waits of served customers
    pub cumulative_wait_time: f64,
    /// Sum of arrival-to-departure times of served customers
    pub cumulative_system_time: f64,
    /// Sum of service durations of served customers
    pub cumulative_busy_time: f64,
    /// Longest queue observed so far
    pub max_queue_length: usize,
}

impl RunStatistics {
    /// Create zeroed statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a processed arrival
    pub fn record_arrival(&mut self) {
        self.total_arrived += 1;
    }

    /// Raise the queue-length watermark if `queue_length` exceeds it
    pub fn observe_queue_length(&mut self, queue_length: usize) {
        self.max_queue_length = self.max_queue_length.max(queue_length);
    }

    /// Account for a processed departure
    pub fn record_departure(&mut self, wait_time: f64, system_time: f64, service_time: f64) {
        debug_assert!(wait_time >= 0.0 && system_time >= 0.0 && service_time >= 0.0);
        self.total_served += 1;
        self.cumulative_wait_time += wait_time;
        self.cumulative_system_time += system_time;
        self.cumulative_busy_time += service_time;
    }

    /// Customers that have arrived and not yet departed
    pub fn customers_in_system(&self) -> u64 {
        self.total_arrived - self.total_served
    }

    /// Mean wait in queue per served customer
    pub fn mean_wait_time(&self) -> f64 {
        if self.total_served == 0 {
            0.0
        } else {
            self.cumulative_wait_time / self.total_served as f64
        }
    }

    /// Mean time in system per served customer
    pub fn mean_system_time(&self) -> f64 {
        if self.total_served == 0 {
            0.0
        } else {
            self.cumulative_system_time / self.total_served as f64
        }
    }

    /// Mean service duration per served customer
    pub fn mean_service_time(&self) -> f64 {
        if self.total_served == 0 {
            0.0
        } else {
            self.cumulative_busy_time / self.total_served as f64
        }
    }

    /// Fraction of `elapsed` the server spent busy with served customers
    pub fn utilization(&self, elapsed: f64) -> f64 {
        if elapsed <= 0.0 {
            0.0
        } else {
            self.cumulative_busy_time / elapsed
        }
    }

    /// Time-average queue length over `elapsed`
    pub fn mean_queue_length(&self, elapsed: f64) -> f64 {
        if elapsed <= 0.0 {
            0.0
        } else {
            self.cumulative_wait_time / elapsed
        }
    }

    /// Time-average number in system over `elapsed`
    pub fn mean_customers_in_system(&self, elapsed: f64) -> f64 {
        if elapsed <= 0.0 {
            0.0
        } else {
            self.cumulative_system_time / elapsed
        }
    }

    /// One-line summary
    pub fn compact_summary(&self) -> String {
        format!(
            "arrived={} served={} max_queue={} wait_sum={:.4} system_sum={:.4} busy_sum={:.4}",
            self.total_arrived,
            self.total_served,
            self.max_queue_length,
            self.cumulative_wait_time,
            self.cumulative_system_time,
            self.cumulative_busy_time
        )
    }
}

/// Averages derived from [`RunStatistics`] over a known elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Mean wait in queue per served customer
    pub mean_wait_time: f64,
    /// Mean time in system per served customer
    pub mean_system_time: f64,
    /// Mean service duration per served customer
    pub mean_service_time: f64,
    /// Busy time divided by elapsed time
    pub utilization: f64,
    /// Time-average queue length
    pub mean_queue_length: f64,
    /// Time-average number in system
    pub mean_customers_in_system: f64,
}

impl DerivedMetrics {
    /// Derive all averages from `statistics` over `elapsed` minutes
    pub fn from_statistics(statistics: &RunStatistics, elapsed: f64) -> Self {
        Self {
            mean_wait_time: statistics.mean_wait_time(),
            mean_system_time: statistics.mean_system_time(),
            mean_service_time: statistics.mean_service_time(),
            utilization: statistics.utilization(elapsed),
            mean_queue_length: statistics.mean_queue_length(elapsed),
            mean_customers_in_system: statistics.mean_customers_in_system(elapsed),
        }
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.compact_summary())
    }
}
