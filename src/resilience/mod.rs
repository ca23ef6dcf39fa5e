//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to enrichment worker:
//!     → timeouts.rs (per-call timeout bounded by the inbound deadline)
//!     → On failure: error is terminal for the request (no retries)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - Task creation is not idempotent, so nothing is retried

pub mod timeouts;

pub use timeouts::effective_timeout;
