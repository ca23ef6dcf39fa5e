//! Request middleware.

pub mod trace_requests;

pub use trace_requests::trace_requests;
