use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::Instrument;

use crate::application::ports::{JobRepository, RepositoryError, WorkItem};

use super::ocr_pipeline::OcrPipeline;

/// Drains the work queue and drives one job at a time through the pipeline.
///
/// The mpsc receiver is the lease: an item reaching this worker is invisible
/// to every other worker, so each job record has exactly one writer. Job
/// failures are recorded on the job and never crash the worker loop.
pub struct OcrWorker {
    receiver: mpsc::Receiver<WorkItem>,
    pipeline: Arc<OcrPipeline>,
    repository: Arc<dyn JobRepository>,
}

impl OcrWorker {
    pub fn new(
        receiver: mpsc::Receiver<WorkItem>,
        pipeline: Arc<OcrPipeline>,
        repository: Arc<dyn JobRepository>,
    ) -> Self {
        Self {
            receiver,
            pipeline,
            repository,
        }
    }

    pub async fn run(mut self) {
        tracing::info!("OCR worker started");
        while let Some(item) = self.receiver.recv().await {
            let span = tracing::info_span!(
                "ocr_job",
                job_id = %item.job_id,
                filename = %item.filename,
                correlation_id = %item.correlation_id,
            );

            if let Err(e) = self.process(item).instrument(span).await {
                tracing::error!(error = %e, "Failed to record job state");
            }
        }
        tracing::info!("OCR worker stopped: queue closed");
    }

    async fn process(&self, item: WorkItem) -> Result<(), RepositoryError> {
        if let Err(e) = self.repository.mark_started(item.job_id).await {
            // The record is gone or already owned; drop the staged input so
            // it does not outlive the job.
            let _ = tokio::fs::remove_file(&item.temp_path).await;
            return Err(e);
        }

        let result = self.pipeline.execute(&item.temp_path, &item.filename).await;

        match &result.error {
            Some(error) => tracing::warn!(error = %error, "OCR job failed"),
            None => tracing::info!("OCR job finished"),
        }

        self.repository.complete(item.job_id, &result).await
    }
}
