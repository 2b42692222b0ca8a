use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::ports::{JobQueue, JobRepository, WorkItem};
use crate::domain::{Job, JobId};

/// Persists the upload into the staging directory and hands the job to the
/// queue. Exactly one enqueue attempt per invocation; when the queue or the
/// record store refuses, everything already created is rolled back and no
/// job id is minted.
pub struct SubmissionService {
    staging_dir: PathBuf,
    queue: Arc<dyn JobQueue>,
    repository: Arc<dyn JobRepository>,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("failed to stage upload: {0}")]
    Staging(#[from] io::Error),
    #[error("job queue unavailable: {0}")]
    QueueUnavailable(String),
}

impl SubmissionService {
    pub fn new(
        staging_dir: PathBuf,
        queue: Arc<dyn JobQueue>,
        repository: Arc<dyn JobRepository>,
    ) -> Result<Self, io::Error> {
        std::fs::create_dir_all(&staging_dir)?;
        Ok(Self {
            staging_dir,
            queue,
            repository,
        })
    }

    pub async fn submit(
        &self,
        content: &[u8],
        filename: &str,
        correlation_id: &str,
    ) -> Result<JobId, SubmitError> {
        let job = Job::new(filename.to_string(), correlation_id.to_string());

        // Staged under the job id, not the client-supplied name.
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin");
        let temp_path = self
            .staging_dir
            .join(format!("{}.{}", job.id.as_uuid(), extension));

        if let Err(e) = tokio::fs::write(&temp_path, content).await {
            // A failed write can still leave a partial file behind.
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(SubmitError::Staging(e));
        }

        if let Err(e) = self.repository.create(&job).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(SubmitError::QueueUnavailable(e.to_string()));
        }

        let item = WorkItem {
            job_id: job.id,
            temp_path: temp_path.clone(),
            filename: filename.to_string(),
            correlation_id: correlation_id.to_string(),
        };

        if let Err(e) = self.queue.enqueue(item).await {
            if let Err(del_err) = self.repository.delete(job.id).await {
                tracing::warn!(
                    job_id = %job.id,
                    error = %del_err,
                    "Failed to remove job record after enqueue failure"
                );
            }
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(SubmitError::QueueUnavailable(e.to_string()));
        }

        tracing::info!(
            job_id = %job.id,
            filename = %filename,
            correlation_id = %correlation_id,
            "OCR job enqueued"
        );

        Ok(job.id)
    }
}
