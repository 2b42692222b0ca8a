use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::application::ports::{JobQueue, QueueError, WorkItem};

/// In-process work queue over a bounded tokio channel.
///
/// The channel gives the lease semantics the pipeline relies on: each item
/// is delivered to exactly one receiver. `send` applies backpressure when
/// the queue is full; a closed channel (worker gone) reports the queue as
/// unavailable so no job id is handed out.
pub struct ChannelJobQueue {
    sender: mpsc::Sender<WorkItem>,
}

impl ChannelJobQueue {
    pub fn new(sender: mpsc::Sender<WorkItem>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl JobQueue for ChannelJobQueue {
    async fn enqueue(&self, item: WorkItem) -> Result<(), QueueError> {
        self.sender
            .send(item)
            .await
            .map_err(|_| QueueError::Unavailable("worker queue closed".to_string()))
    }
}
