//! End-of-run report
//!
//! Collects identity, inputs and results of a run in one serializable record and
//! renders it for the terminal or as JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::simulation::{DerivedMetrics, RunState, RunStatistics, SimulationResult};
use crate::types::{OutputFormat, QueueParameters, RunId, RunPhase};

/// Summary of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Identity of the run; absent if it was never started
    pub run_id: Option<RunId>,
    /// Seed that reproduces the run
    pub seed: u64,
    /// Normalized inputs (per-minute rates, horizon in minutes)
    pub parameters: QueueParameters,
    /// Phase when the report was taken
    pub phase: RunPhase,
    /// Snapshot at the report time
    pub final_state: RunState,
    /// Cumulative totals
    pub statistics: RunStatistics,
    /// Averages over the elapsed logical time
    pub metrics: DerivedMetrics,
    /// Customers that arrived but never departed
    pub customers_left_in_system: u64,
    /// Wall-clock time the report was produced
    pub generated_at: DateTime<Utc>,
}

impl RunReport {
    /// Assemble a report; averages are taken over `final_state.logical_time`
    pub fn new(
        run_id: Option<RunId>,
        seed: u64,
        parameters: QueueParameters,
        phase: RunPhase,
        final_state: RunState,
        statistics: RunStatistics,
    ) -> Self {
        Self {
            run_id,
            seed,
            parameters,
            phase,
            final_state,
            statistics,
            metrics: DerivedMetrics::from_statistics(&statistics, final_state.logical_time),
            customers_left_in_system: statistics.customers_in_system(),
            generated_at: Utc::now(),
        }
    }

    /// Render in the requested format
    pub fn render(&self, format: OutputFormat) -> SimulationResult<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    /// Human-readable multi-line summary
    pub fn to_text(&self) -> String {
        let params = &self.parameters;
        let stats = &self.statistics;
        let metrics = &self.metrics;
        let run_id = self.run_id.map_or_else(|| "-".to_string(), |id| id.to_string());

        let mut out = String::new();
        let _ = writeln!(out, "M/M/1 simulation report");
        let _ = writeln!(out, "  Run:                 {}", run_id);
        let _ = writeln!(out, "  Seed:                {}", self.seed);
        let _ = writeln!(out, "  Phase:               {}", self.phase);
        let _ = writeln!(out, "  Generated:           {}", self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
        let _ = writeln!(out);
        let _ = writeln!(out, "Parameters");
        let _ = writeln!(out, "  Arrival rate (λ):    {:.4} /min", params.arrival_rate);
        let _ = writeln!(out, "  Service rate (μ):    {:.4} /min", params.service_rate);
        let _ = writeln!(out, "  Offered load (ρ):    {:.4}", params.offered_load());
        let _ = writeln!(out, "  Horizon:             {}", format_minutes(params.horizon));
        let _ = writeln!(out);
        let _ = writeln!(out, "Totals");
        let _ = writeln!(out, "  Arrived:             {}", stats.total_arrived);
        let _ = writeln!(out, "  Served:              {}", stats.total_served);
        let _ = writeln!(out, "  Left in system:      {}", self.customers_left_in_system);
        let _ = writeln!(out, "  Max queue length:    {}", stats.max_queue_length);
        let _ = writeln!(out, "  Busy time:           {}", format_minutes(stats.cumulative_busy_time));
        let _ = writeln!(out);
        let _ = writeln!(out, "Averages");
        let _ = writeln!(out, "  Utilization:         {:.2}%", metrics.utilization * 100.0);
        let _ = writeln!(out, "  Mean wait (Wq):      {}", format_minutes(metrics.mean_wait_time));
        let _ = writeln!(out, "  Mean in system (W):  {}", format_minutes(metrics.mean_system_time));
        let _ = writeln!(out, "  Mean service time:   {}", format_minutes(metrics.mean_service_time));
        let _ = writeln!(out, "  Mean queue (Lq):     {:.4}", metrics.mean_queue_length);
        let _ = write!(out, "  Mean in system (L):  {:.4}", metrics.mean_customers_in_system);
        out
    }
}

/// Format a duration given in minutes, switching to seconds below one minute
pub fn format_minutes(minutes: f64) -> String {
    if minutes.abs() < 1.0 {
        format!("{:.2} s", minutes * 60.0)
    } else {
        format!("{:.4} min", minutes)
    }
}
