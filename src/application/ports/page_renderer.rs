use std::path::{Path, PathBuf};

/// Splits a PDF into per-page renderable images, bounded by `max_pages`.
/// Blocking; the pipeline runs it on a blocking task. Returned paths are
/// owned by the caller, which is responsible for deleting them.
pub trait PageRenderer: Send + Sync {
    fn render(&self, pdf_path: &Path, max_pages: usize) -> Result<Vec<PathBuf>, RenderError>;
}

/// Document-level failures. Each of these fails the whole job with no
/// partial text.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("PDF has no pages or is empty")]
    Empty,
    #[error("PDF is password-protected or encrypted")]
    Encrypted,
    #[error("PDF file is corrupted or invalid: {0}")]
    Corrupted(String),
    #[error("page rendering failed: {0}")]
    Renderer(String),
}
