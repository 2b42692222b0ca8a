use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::JobId;

/// One unit of queued work: everything a lease-holding worker needs to
/// process a job without touching request state.
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub job_id: JobId,
    pub temp_path: PathBuf,
    pub filename: String,
    pub correlation_id: String,
}

/// Queue-shaped seam between submission and the worker side. Implementations
/// must hand each item to exactly one worker.
#[async_trait]
pub trait JobQueue: Send + Sync {
    async fn enqueue(&self, item: WorkItem) -> Result<(), QueueError>;
}

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("queue unavailable: {0}")]
    Unavailable(String),
}
