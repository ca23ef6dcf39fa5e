//! In-memory task store.
//!
//! # Responsibilities
//! - Assign task ids
//! - Append enriched tasks in id order
//! - Hand out consistent snapshots
//!
//! # Design Decisions
//! - A single mutex guards both the task list and the id counter, so an id
//!   is never handed out without its task being appended in the same step
//! - Ids reflect the order appends complete, not the order requests arrived

use tokio::sync::Mutex;

use crate::enrichment::Enrichment;
use crate::observability::metrics;
use crate::store::task::Task;

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    tasks: Vec<Task>,
}

/// Process-wide task collection, shared by all request handlers.
#[derive(Debug, Default)]
pub struct TaskStore {
    inner: Mutex<Inner>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all tasks in creation order.
    pub async fn list(&self) -> Vec<Task> {
        self.inner.lock().await.tasks.clone()
    }

    /// Assign the next id and append a task built from `text` and its
    /// enrichment result.
    pub async fn append(&self, text: String, enrichment: Enrichment) -> Task {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;

        let task = Task {
            id: inner.next_id,
            text,
            priority: enrichment.priority,
            score: enrichment.score,
            status: enrichment.status,
        };
        inner.tasks.push(task.clone());
        metrics::record_tasks_stored(inner.tasks.len());

        task
    }
}
