//! Task enrichment subsystem.
//!
//! # Data Flow
//! ```text
//! create handler (RequestContext, text)
//!     → client.rs (client span, traceparent injection, timeout)
//!     → POST {worker}/enrich  {"text": ...}
//!     → types.rs (decode {"priority","score","status"})
//!     → Enrichment | EnrichError (error.rs)
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::EnrichmentClient;
pub use error::EnrichError;
pub use types::Enrichment;
