//! Timeout enforcement.
//!
//! # Responsibilities
//! - Combine a fixed per-call timeout with the caller's deadline
//! - Whichever expires first bounds the outbound call
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities at the call site
//! - Timeout errors are distinct from other transport errors

use std::time::{Duration, Instant};

/// Time budget for an outbound call: `cap`, shortened to whatever is left
/// before `deadline`. A passed deadline yields zero.
pub fn effective_timeout(cap: Duration, deadline: Option<Instant>, now: Instant) -> Duration {
    match deadline {
        Some(deadline) => cap.min(deadline.saturating_duration_since(now)),
        None => cap,
    }
}
