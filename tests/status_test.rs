use std::sync::Arc;
use std::time::Duration;

use tessera::application::ports::{JobRepository, RepositoryError};
use tessera::application::services::StatusService;
use tessera::domain::{Job, JobResult, JobStatus};
use tessera::infrastructure::persistence::InMemoryJobRepository;

const TEST_TTL: Duration = Duration::from_secs(3600);

fn service_with_repo(ttl: Duration) -> (Arc<InMemoryJobRepository>, StatusService) {
    let repo = Arc::new(InMemoryJobRepository::new(ttl));
    let service = StatusService::new(repo.clone());
    (repo, service)
}

#[tokio::test]
async fn given_unknown_job_id_when_polling_then_returns_failed_not_found() {
    let (_repo, service) = service_with_repo(TEST_TTL);

    let view = service.poll("6e7b2b50-94b3-4f37-8c7e-0a8f2f3a9d10").await;

    assert_eq!(view.status, JobStatus::Failed);
    assert_eq!(view.error.unwrap(), "Job not found or expired");
    assert!(view.text.is_none());
}

#[tokio::test]
async fn given_malformed_job_id_when_polling_then_returns_failed_not_found() {
    let (_repo, service) = service_with_repo(TEST_TTL);

    let view = service.poll("not-a-uuid").await;

    assert_eq!(view.status, JobStatus::Failed);
    assert_eq!(view.error.unwrap(), "Job not found or expired");
}

#[tokio::test]
async fn given_queued_job_when_polling_then_passes_through_with_no_text_or_error() {
    let (repo, service) = service_with_repo(TEST_TTL);
    let job = Job::new("scan.png".to_string(), "-".to_string());
    repo.create(&job).await.unwrap();

    let view = service.poll(&job.id.to_string()).await;

    assert_eq!(view.status, JobStatus::Queued);
    assert!(view.text.is_none());
    assert!(view.error.is_none());
}

#[tokio::test]
async fn given_started_job_when_polling_then_status_is_started() {
    let (repo, service) = service_with_repo(TEST_TTL);
    let job = Job::new("scan.png".to_string(), "-".to_string());
    repo.create(&job).await.unwrap();
    repo.mark_started(job.id).await.unwrap();

    let view = service.poll(&job.id.to_string()).await;

    assert_eq!(view.status, JobStatus::Started);
    assert!(view.text.is_none());
    assert!(view.error.is_none());
}

#[tokio::test]
async fn given_finished_job_when_polling_then_text_is_returned() {
    let (repo, service) = service_with_repo(TEST_TTL);
    let job = Job::new("scan.png".to_string(), "-".to_string());
    repo.create(&job).await.unwrap();
    repo.mark_started(job.id).await.unwrap();
    repo.complete(job.id, &JobResult::success("hello world"))
        .await
        .unwrap();

    let view = service.poll(&job.id.to_string()).await;

    assert_eq!(view.status, JobStatus::Finished);
    assert_eq!(view.text.unwrap(), "hello world");
    assert!(view.error.is_none());
}

#[tokio::test]
async fn given_job_with_stored_error_when_polling_then_status_is_failed_with_that_error() {
    let (repo, service) = service_with_repo(TEST_TTL);
    let job = Job::new("bad.pdf".to_string(), "-".to_string());
    repo.create(&job).await.unwrap();
    repo.mark_started(job.id).await.unwrap();
    repo.complete(job.id, &JobResult::failure("PDF has no pages or is empty"))
        .await
        .unwrap();

    let view = service.poll(&job.id.to_string()).await;

    assert_eq!(view.status, JobStatus::Failed);
    assert_eq!(view.error.unwrap(), "PDF has no pages or is empty");
    assert!(view.text.is_none());
}

#[tokio::test]
async fn given_expired_job_when_polling_then_returns_failed_not_found() {
    let (repo, service) = service_with_repo(Duration::from_millis(50));
    let job = Job::new("scan.png".to_string(), "-".to_string());
    repo.create(&job).await.unwrap();

    tokio::time::sleep(Duration::from_millis(120)).await;

    let view = service.poll(&job.id.to_string()).await;

    assert_eq!(view.status, JobStatus::Failed);
    assert_eq!(view.error.unwrap(), "Job not found or expired");
}

#[tokio::test]
async fn given_expired_job_when_transitioning_then_repository_reports_not_found() {
    let (repo, _service) = service_with_repo(Duration::from_millis(50));
    let job = Job::new("scan.png".to_string(), "-".to_string());
    repo.create(&job).await.unwrap();

    tokio::time::sleep(Duration::from_millis(120)).await;

    assert!(matches!(
        repo.mark_started(job.id).await,
        Err(RepositoryError::NotFound(_))
    ));
    assert!(matches!(
        repo.complete(job.id, &JobResult::success("text")).await,
        Err(RepositoryError::NotFound(_))
    ));
}

#[tokio::test]
async fn given_terminal_job_when_marking_started_again_then_repository_rejects_regression() {
    let (repo, _service) = service_with_repo(TEST_TTL);
    let job = Job::new("scan.png".to_string(), "-".to_string());
    repo.create(&job).await.unwrap();
    repo.mark_started(job.id).await.unwrap();
    repo.complete(job.id, &JobResult::success("text"))
        .await
        .unwrap();

    let result = repo.mark_started(job.id).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn given_queued_job_when_completing_without_start_then_repository_rejects_skip() {
    let (repo, _service) = service_with_repo(TEST_TTL);
    let job = Job::new("scan.png".to_string(), "-".to_string());
    repo.create(&job).await.unwrap();

    let result = repo.complete(job.id, &JobResult::success("text")).await;

    assert!(result.is_err());
}
