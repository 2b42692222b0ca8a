use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{PageRenderer, RenderError};
use crate::domain::{DocumentKind, JobResult};

use super::bounded_ocr::{BoundedOcr, OcrCallError};
use super::temp_artifacts::TempArtifacts;

/// Worker-side core: decomposes a document, runs each page through the
/// bounded OCR executor, aggregates the output, and cleans up every temp
/// artifact regardless of how processing ended.
///
/// `execute` never fails past its boundary: every failure mode is captured
/// into the returned `JobResult`.
pub struct OcrPipeline {
    ocr: BoundedOcr,
    renderer: Arc<dyn PageRenderer>,
    max_pages: usize,
    job_timeout: Duration,
}

impl OcrPipeline {
    pub fn new(
        ocr: BoundedOcr,
        renderer: Arc<dyn PageRenderer>,
        max_pages: usize,
        job_timeout: Duration,
    ) -> Self {
        Self {
            ocr,
            renderer,
            max_pages,
            job_timeout,
        }
    }

    pub async fn execute(&self, temp_path: &Path, filename: &str) -> JobResult {
        let mut artifacts = TempArtifacts::new();
        artifacts.register(temp_path.to_path_buf());

        let result = match tokio::time::timeout(
            self.job_timeout,
            self.run(temp_path, filename, &mut artifacts),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(filename = %filename, "Job exceeded overall execution timeout");
                JobResult::failure("processing timed out")
            }
        };

        artifacts.cleanup();
        result
    }

    async fn run(
        &self,
        temp_path: &Path,
        filename: &str,
        artifacts: &mut TempArtifacts,
    ) -> JobResult {
        match DocumentKind::from_filename(filename) {
            Some(kind) if kind.is_pdf() => self.run_pdf(temp_path, artifacts).await,
            Some(_) => self.run_image(temp_path).await,
            // Validation rejects these before submission; a stray item still
            // gets a terminal result instead of wedging the job.
            None => JobResult::failure(format!("Unsupported file type: {}", filename)),
        }
    }

    async fn run_image(&self, image_path: &Path) -> JobResult {
        match self.ocr.run(image_path).await {
            Ok(text) => JobResult::success(text),
            Err(e) => JobResult::failure(e.to_string()),
        }
    }

    async fn run_pdf(&self, pdf_path: &Path, artifacts: &mut TempArtifacts) -> JobResult {
        let renderer = Arc::clone(&self.renderer);
        let path = pdf_path.to_path_buf();
        let max_pages = self.max_pages;

        let pages = match tokio::task::spawn_blocking(move || renderer.render(&path, max_pages))
            .await
        {
            Ok(Ok(pages)) => pages,
            Ok(Err(e)) => return JobResult::failure(e.to_string()),
            Err(join_err) => {
                return JobResult::failure(format!("page rendering failed: {}", join_err));
            }
        };

        if pages.is_empty() {
            return JobResult::failure(RenderError::Empty.to_string());
        }

        for page in &pages {
            artifacts.register(page.clone());
        }

        let mut sections = Vec::with_capacity(pages.len());
        for (index, page_path) in pages.iter().enumerate() {
            let page_number = index + 1;
            match self.ocr.run(page_path).await {
                Ok(text) => {
                    sections.push(format!("--- Page {} ---\n{}", page_number, text.trim()));
                }
                Err(OcrCallError::Timeout) => {
                    // A single slow page degrades to a placeholder; the rest
                    // of the document still gets processed.
                    tracing::warn!(page = page_number, "Page OCR timed out, recording placeholder");
                    sections.push(format!(
                        "--- Page {} ---\n[Page {} timed out]",
                        page_number, page_number
                    ));
                }
                Err(e @ OcrCallError::Engine(_)) => {
                    return JobResult::failure(e.to_string());
                }
            }
        }

        JobResult::success(sections.join("\n\n"))
    }
}
