use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{JobId, JobStatus};

/// Terminal output of one job. Populated only when the job reaches a
/// terminal status; exactly one of `text` / `error` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResult {
    pub text: Option<String>,
    pub error: Option<String>,
}

impl JobResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            text: None,
            error: Some(error.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// One submitted document's unit of async work.
///
/// Mutated exactly once on start and once on terminal completion, by the
/// single worker holding the queue lease for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub status: JobStatus,
    pub filename: String,
    pub correlation_id: String,
    pub result: JobResult,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl Job {
    pub fn new(filename: String, correlation_id: String) -> Self {
        Self {
            id: JobId::new(),
            status: JobStatus::Queued,
            filename,
            correlation_id,
            result: JobResult::default(),
            created_at: Utc::now(),
            started_at: None,
            ended_at: None,
        }
    }

    /// Transition `queued -> started`. Rejects any other starting state so
    /// status never regresses and `started` is never skipped.
    pub fn start(&mut self) -> Result<(), String> {
        if self.status != JobStatus::Queued {
            return Err(format!("cannot start job in {} state", self.status));
        }
        self.status = JobStatus::Started;
        self.started_at = Some(Utc::now());
        Ok(())
    }

    /// Transition `started -> finished | failed`, picking the terminal
    /// status from the result's error field.
    pub fn finish(&mut self, result: JobResult) -> Result<(), String> {
        if self.status != JobStatus::Started {
            return Err(format!("cannot finish job in {} state", self.status));
        }
        self.status = if result.is_failure() {
            JobStatus::Failed
        } else {
            JobStatus::Finished
        };
        self.result = result;
        self.ended_at = Some(Utc::now());
        Ok(())
    }
}
