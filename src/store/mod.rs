//! Task storage subsystem.
//!
//! # Data Flow
//! ```text
//! create handler (after successful enrichment)
//!     → memory.rs append (id assigned under lock)
//! list handler
//!     → memory.rs list (snapshot under the same lock)
//! ```
//!
//! State lives in process memory only and is lost on restart.

pub mod memory;
pub mod task;

pub use memory::TaskStore;
pub use task::Task;
