mod common;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use tessera::application::ports::{JobQueue, JobRepository};
use tessera::application::services::{OcrWorker, StatusService, SubmissionService};
use tessera::domain::{JobId, JobStatus};
use tessera::infrastructure::persistence::InMemoryJobRepository;
use tessera::infrastructure::queue::ChannelJobQueue;

use common::{test_pipeline, StubDocument, StubRenderer};

const TEST_TTL: Duration = Duration::from_secs(3600);

async fn poll_until_terminal(
    service: &StatusService,
    job_id: JobId,
) -> tessera::application::services::JobView {
    for _ in 0..200 {
        let view = service.poll(&job_id.to_string()).await;
        if view.status.is_terminal() {
            return view;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job never reached a terminal state");
}

#[tokio::test]
async fn given_submitted_pdf_when_worker_runs_then_job_finishes_with_page_text() {
    let staging = tempfile::TempDir::new().unwrap();
    let repo: Arc<InMemoryJobRepository> = Arc::new(InMemoryJobRepository::new(TEST_TTL));
    let renderer = Arc::new(StubRenderer::new(StubDocument::Pages(vec!["alpha", "slow"])));

    let (tx, rx) = mpsc::channel(8);
    let queue: Arc<dyn JobQueue> = Arc::new(ChannelJobQueue::new(tx));
    let worker = OcrWorker::new(rx, Arc::new(test_pipeline(renderer.clone())), repo.clone());
    tokio::spawn(worker.run());

    let submission =
        SubmissionService::new(staging.path().to_path_buf(), queue, repo.clone()).unwrap();
    let status = StatusService::new(repo.clone());

    let job_id = submission
        .submit(b"pdf bytes", "report.pdf", "req-9")
        .await
        .unwrap();

    let view = poll_until_terminal(&status, job_id).await;

    assert_eq!(view.status, JobStatus::Finished);
    let text = view.text.unwrap();
    assert!(text.contains("--- Page 1 ---\nrecognized alpha"));
    assert!(text.contains("--- Page 2 ---\n[Page 2 timed out]"));

    // Lifecycle timestamps written once each by the worker.
    let job = repo.get_by_id(job_id).await.unwrap().unwrap();
    assert!(job.started_at.is_some());
    assert!(job.ended_at.is_some());
    assert!(job.started_at.unwrap() <= job.ended_at.unwrap());

    // Staged input must not outlive the job.
    let leftovers: Vec<_> = std::fs::read_dir(staging.path()).unwrap().collect();
    assert!(leftovers.is_empty(), "staging dir should be empty");
    for page in renderer.created_paths() {
        assert!(!page.exists());
    }
}

#[tokio::test]
async fn given_submitted_encrypted_pdf_when_worker_runs_then_job_fails_with_document_error() {
    let staging = tempfile::TempDir::new().unwrap();
    let repo: Arc<InMemoryJobRepository> = Arc::new(InMemoryJobRepository::new(TEST_TTL));
    let renderer = Arc::new(StubRenderer::new(StubDocument::Encrypted));

    let (tx, rx) = mpsc::channel(8);
    let queue: Arc<dyn JobQueue> = Arc::new(ChannelJobQueue::new(tx));
    let worker = OcrWorker::new(rx, Arc::new(test_pipeline(renderer)), repo.clone());
    tokio::spawn(worker.run());

    let submission =
        SubmissionService::new(staging.path().to_path_buf(), queue, repo.clone()).unwrap();
    let status = StatusService::new(repo.clone());

    let job_id = submission
        .submit(b"pdf bytes", "secret.pdf", "-")
        .await
        .unwrap();

    let view = poll_until_terminal(&status, job_id).await;

    assert_eq!(view.status, JobStatus::Failed);
    assert_eq!(
        view.error.unwrap(),
        "PDF is password-protected or encrypted"
    );
    assert!(view.text.is_none());
}

#[tokio::test]
async fn given_closed_worker_queue_when_submitting_then_caller_sees_unavailable() {
    let staging = tempfile::TempDir::new().unwrap();
    let repo: Arc<InMemoryJobRepository> = Arc::new(InMemoryJobRepository::new(TEST_TTL));

    let (tx, rx) = mpsc::channel(8);
    drop(rx);
    let queue: Arc<dyn JobQueue> = Arc::new(ChannelJobQueue::new(tx));

    let submission =
        SubmissionService::new(staging.path().to_path_buf(), queue, repo.clone()).unwrap();

    let result = submission.submit(b"image", "scan.png", "-").await;

    assert!(result.is_err());
    let leftovers: Vec<_> = std::fs::read_dir(staging.path()).unwrap().collect();
    assert!(leftovers.is_empty());
}
