use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::{Job, JobId, JobResult};

/// Map-backed job store for tests and single-node setups. Applies the
/// retention TTL on every lookup: a record older than the TTL reads as
/// absent and can no longer be transitioned.
pub struct InMemoryJobRepository {
    jobs: RwLock<HashMap<Uuid, Job>>,
    result_ttl: Duration,
}

impl InMemoryJobRepository {
    pub fn new(result_ttl: Duration) -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
            result_ttl,
        }
    }

    fn is_expired(&self, job: &Job) -> bool {
        let age = Utc::now().signed_duration_since(job.created_at);
        age.to_std().map(|age| age > self.result_ttl).unwrap_or(false)
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn create(&self, job: &Job) -> Result<(), RepositoryError> {
        let mut jobs = self.jobs.write().await;
        if jobs.contains_key(&job.id.as_uuid()) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "job {} already exists",
                job.id
            )));
        }
        jobs.insert(job.id.as_uuid(), job.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
        let jobs = self.jobs.read().await;
        match jobs.get(&id.as_uuid()) {
            Some(job) if self.is_expired(job) => Ok(None),
            Some(job) => Ok(Some(job.clone())),
            None => Ok(None),
        }
    }

    async fn mark_started(&self, id: JobId) -> Result<(), RepositoryError> {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .get_mut(&id.as_uuid())
            .filter(|job| !self.is_expired(job))
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        job.start().map_err(RepositoryError::ConstraintViolation)
    }

    async fn complete(&self, id: JobId, result: &JobResult) -> Result<(), RepositoryError> {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .get_mut(&id.as_uuid())
            .filter(|job| !self.is_expired(job))
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        job.finish(result.clone())
            .map_err(RepositoryError::ConstraintViolation)
    }

    async fn delete(&self, id: JobId) -> Result<(), RepositoryError> {
        self.jobs.write().await.remove(&id.as_uuid());
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
