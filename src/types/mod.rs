//! Core types and identifiers for the queue simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: sequential customer identities and UUID-based run identities
//! - **Enums**: event kinds, run phases, rate units and output formats
//! - **Configuration**: simulation configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use mm1_queue_simulator::types::*;
//!
//! let config = SimulationConfig {
//!     arrival_rate: 90.0,
//!     service_rate: 120.0,
//!     rate_unit: RateUnit::PerHour,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//!
//! let params = config.queue_parameters();
//! assert_eq!(params.arrival_rate, 1.5);
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
