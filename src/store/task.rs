//! Task entity.

use serde::{Deserialize, Serialize};

/// An enriched task. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Assigned by the store, strictly increasing.
    pub id: u64,
    /// Caller-supplied text, never empty.
    pub text: String,
    pub priority: i64,
    pub score: f64,
    pub status: String,
}
