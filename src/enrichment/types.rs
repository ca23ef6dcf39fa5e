//! Worker wire types.

use serde::{Deserialize, Serialize};

/// Body of `POST /enrich`.
#[derive(Debug, Serialize)]
pub struct EnrichRequest<'a> {
    pub text: &'a str,
}

/// Worker-assigned attributes of a task. Passed through unvalidated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrichment {
    pub priority: i64,
    pub score: f64,
    pub status: String,
}
