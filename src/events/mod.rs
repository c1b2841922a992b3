//! Simulation events and scheduling
//!
//! # Overview
//!
//! - **Event**: an immutable arrival or departure at a logical time
//! - **EventScheduler**: min-heap of pending events with deterministic tie-breaking
//!
//! # Usage Example
//!
//! ```rust
//! use mm1_queue_simulator::events::*;
//! use mm1_queue_simulator::types::CustomerId;
//!
//! let mut scheduler = EventScheduler::new();
//! scheduler.schedule(Event::arrival(0.7, CustomerId(2)));
//! scheduler.schedule(Event::departure(0.4, CustomerId(1)));
//!
//! let first = scheduler.pop_due(1.0).unwrap();
//! assert!(first.is_departure());
//! ```

pub mod event;
pub mod scheduler;

// Re-export all public types for convenience
pub use event::*;
pub use scheduler::*;
