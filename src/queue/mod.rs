//! Customers, their registry, and the server with its waiting line
//!
//! # Overview
//!
//! - **Customer**: arrival, service start and departure timestamps of one customer
//! - **CustomerRegistry**: sole owner of every customer record in a run
//! - **ServerQueueState**: server occupancy plus the FIFO queue of waiting identities
//!
//! # Usage Example
//!
//! ```rust
//! use mm1_queue_simulator::queue::*;
//!
//! let mut registry = CustomerRegistry::new();
//! let mut server = ServerQueueState::new();
//!
//! let first = registry.create(0.2);
//! let second = registry.create(0.3);
//!
//! server.occupy(first);
//! registry.mark_service_start(first, 0.2);
//! server.enqueue(second);
//!
//! assert_eq!(server.customers_in_system(), 2);
//! assert_eq!(server.customers_in_queue(), 1);
//! ```

pub mod customer;
pub mod registry;
pub mod server;

// Re-export all public types for convenience
pub use customer::*;
pub use registry::*;
pub use server::*;
