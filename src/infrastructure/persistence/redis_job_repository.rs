use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, SetExpiry, SetOptions};
use tracing::instrument;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::{Job, JobId, JobResult};

const KEY_PREFIX: &str = "ocr:job:";

/// Job records as JSON values in Redis.
///
/// The retention TTL is set once at creation (`SET ... EX`); status updates
/// rewrite the value with `KEEPTTL` so expiry stays anchored to creation
/// time and polling an expired job naturally reads as not-found.
pub struct RedisJobRepository {
    conn: ConnectionManager,
    result_ttl_secs: u64,
}

impl RedisJobRepository {
    pub fn new(conn: ConnectionManager, result_ttl_secs: u64) -> Self {
        Self {
            conn,
            result_ttl_secs,
        }
    }

    fn key(id: JobId) -> String {
        format!("{}{}", KEY_PREFIX, id.as_uuid())
    }

    fn encode(job: &Job) -> Result<String, RepositoryError> {
        serde_json::to_string(job).map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    fn decode(raw: &str) -> Result<Job, RepositoryError> {
        serde_json::from_str(raw).map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn fetch(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .get(Self::key(id))
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;
        raw.as_deref().map(Self::decode).transpose()
    }

    async fn store_keep_ttl(&self, job: &Job) -> Result<(), RepositoryError> {
        let mut conn = self.conn.clone();
        let options = SetOptions::default().with_expiration(SetExpiry::KEEPTTL);
        let _: () = conn
            .set_options(Self::key(job.id), Self::encode(job)?, options)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl JobRepository for RedisJobRepository {
    #[instrument(skip(self, job), fields(job_id = %job.id))]
    async fn create(&self, job: &Job) -> Result<(), RepositoryError> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(Self::key(job.id), Self::encode(job)?, self.result_ttl_secs)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }

    #[instrument(skip(self), fields(job_id = %id))]
    async fn get_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
        self.fetch(id).await
    }

    #[instrument(skip(self), fields(job_id = %id))]
    async fn mark_started(&self, id: JobId) -> Result<(), RepositoryError> {
        let mut job = self
            .fetch(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        job.start().map_err(RepositoryError::ConstraintViolation)?;
        self.store_keep_ttl(&job).await
    }

    #[instrument(skip(self, result), fields(job_id = %id))]
    async fn complete(&self, id: JobId, result: &JobResult) -> Result<(), RepositoryError> {
        let mut job = self
            .fetch(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        job.finish(result.clone())
            .map_err(RepositoryError::ConstraintViolation)?;
        self.store_keep_ttl(&job).await
    }

    #[instrument(skip(self), fields(job_id = %id))]
    async fn delete(&self, id: JobId) -> Result<(), RepositoryError> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .del(Self::key(id))
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        let mut conn = self.conn.clone();
        redis::cmd("PING")
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))
    }
}
