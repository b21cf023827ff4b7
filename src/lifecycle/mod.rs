//! Lifecycle management for the demo server.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     trigger → latched watch flag → server stops accepting → in-flight requests drain
//! ```
//!
//! # Design Decisions
//! - The router core has no lifecycle of its own; only the host needs this
//! - Shutdown is a latched flag so a trigger is never missed by a late waiter

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
