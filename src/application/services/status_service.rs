use std::sync::Arc;

use uuid::Uuid;

use crate::application::ports::JobRepository;
use crate::domain::{JobId, JobStatus};

pub const NOT_FOUND_ERROR: &str = "Job not found or expired";

/// What a polling client sees for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobView {
    pub status: JobStatus,
    pub text: Option<String>,
    pub error: Option<String>,
}

impl JobView {
    fn not_found() -> Self {
        Self {
            status: JobStatus::Failed,
            text: None,
            error: Some(NOT_FOUND_ERROR.to_string()),
        }
    }
}

/// Translates stored job state into the public polling vocabulary.
/// `poll` never fails: malformed ids, unknown ids, expired records, and
/// backend errors all map to the not-found view.
pub struct StatusService {
    repository: Arc<dyn JobRepository>,
}

impl StatusService {
    pub fn new(repository: Arc<dyn JobRepository>) -> Self {
        Self { repository }
    }

    pub async fn poll(&self, raw_job_id: &str) -> JobView {
        let Ok(uuid) = Uuid::parse_str(raw_job_id) else {
            return JobView::not_found();
        };

        match self.repository.get_by_id(JobId::from_uuid(uuid)).await {
            Ok(Some(job)) => match job.status {
                JobStatus::Queued | JobStatus::Started => JobView {
                    status: job.status,
                    text: None,
                    error: None,
                },
                JobStatus::Finished => JobView {
                    status: JobStatus::Finished,
                    text: job.result.text,
                    error: None,
                },
                JobStatus::Failed => JobView {
                    status: JobStatus::Failed,
                    text: None,
                    error: job.result.error.or_else(|| Some("Job failed".to_string())),
                },
            },
            Ok(None) => JobView::not_found(),
            Err(e) => {
                tracing::error!(job_id = %raw_job_id, error = %e, "Job lookup failed");
                JobView::not_found()
            }
        }
    }
}
