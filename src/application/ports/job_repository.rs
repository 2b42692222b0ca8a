use async_trait::async_trait;

use crate::domain::{Job, JobId, JobResult};

use super::RepositoryError;

/// Job record store with a retention TTL: records read as absent once the
/// TTL has elapsed since creation.
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &Job) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError>;

    /// Record the `queued -> started` transition.
    async fn mark_started(&self, id: JobId) -> Result<(), RepositoryError>;

    /// Record the terminal transition; the terminal status is derived from
    /// the result's error field.
    async fn complete(&self, id: JobId, result: &JobResult) -> Result<(), RepositoryError>;

    async fn delete(&self, id: JobId) -> Result<(), RepositoryError>;

    /// Backend liveness probe for the health endpoint.
    async fn ping(&self) -> Result<(), RepositoryError>;
}
