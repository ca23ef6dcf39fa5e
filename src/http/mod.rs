//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, body limit, timeout)
//!     → middleware/trace_requests.rs (server span, RequestContext)
//!     → handlers.rs (validate, enrich, store)
//!     → error.rs (failures → status + plain-text message)
//!     → Send to client
//! ```

pub mod context;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;

pub use context::RequestContext;
pub use error::ApiError;
pub use server::{AppState, HttpServer};
