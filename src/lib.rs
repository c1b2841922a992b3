//! M/M/1 Queue Simulator
//!
//! A discrete-event simulation of a single-server first-in-first-out queue with
//! Poisson arrivals and exponentially distributed service times.
//!
//! # Overview
//!
//! The engine is step-driven: an external driver (the bundled CLI, a test, or a
//! UI timer) calls [`SimulationController::tick`] with a logical-time increment,
//! and the controller applies every arrival and departure that falls due before
//! handing back a snapshot, cumulative statistics, and the time-series samples
//! produced during that tick. Nothing runs in the background.
//!
//! ## Key Features
//!
//! - **Reproducible runs**: every random draw comes from one seeded generator
//! - **Bounded horizon**: events at or past the horizon are never scheduled
//! - **Deterministic ordering**: departures precede arrivals at equal times, then FIFO
//! - **Lifecycle control**: start, pause, resume, reset and tick
//! - **Trace output**: per-event samples streamed to JSONL and summarized offline
//!
//! ## Quick Start
//!
//! ```rust
//! use mm1_queue_simulator::*;
//!
//! let config = SimulationConfig { seed: Some(42), ..Default::default() };
//! let mut controller = SimulationController::from_config(&config)?;
//!
//! let report = controller.run_to_completion(config.tick_delta)?;
//! println!("{} customers served", report.statistics.total_served);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Identifiers, enums, and configuration
//! - [`events`]: Events and the time-ordered scheduler
//! - [`queue`]: Customers, the registry, and the server with its waiting line
//! - [`simulation`]: Controller, variates, statistics, trace, and reporting
//! - [`analysis`]: Reading recorded traces back and summarizing them
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │   Events    │    │    Queue    │
//! │             │    │             │    │             │
//! │ Identifiers │◄───┤ Event       │    │ Customer    │
//! │ Enums       │    │ Scheduler   │    │ Registry    │
//! │ Config      │    │             │    │ Server      │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!        ▲                   ▲                   ▲
//!        │                   │                   │
//!        │           ┌─────────────┐    ┌─────────────┐
//!        └───────────┤ Simulation  │◄───┤  Analysis   │
//!                    │             │    │             │
//!                    │ Controller  │    │ Trace       │
//!                    │ Statistics  │    │ Summary     │
//!                    └─────────────┘    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod analysis;
pub mod events;
pub mod queue;
pub mod simulation;
pub mod types;

// Core types and identifiers
pub use types::{
    ConfigError,
    ConfigValidationError,
    // Identifiers
    CustomerId,
    // Enums
    EventKind,
    OutputFormat,
    QueueParameters,
    RateUnit,
    RunId,
    RunPhase,
    // Configuration
    SimulationConfig,
};

// Events and scheduling
pub use events::{Event, EventScheduler};

// Queue state
pub use queue::{Customer, CustomerRegistry, ServerQueueState};

// Simulation engine
pub use simulation::{
    DerivedMetrics, JsonlTraceWriter, LoggingConfig, RunReport, RunState, RunStatistics,
    SimulationController, SimulationError, SimulationResult, TickReport, TimeSample, TimeSeries,
    TraceSink, VariateGenerator,
};

// Trace analysis
pub use analysis::{load_trace, summarize_trace, TraceSummary};
