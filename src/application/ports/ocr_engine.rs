use std::path::Path;

/// One blocking call into the external OCR engine. Implementations may take
/// arbitrarily long; callers are expected to run this on a blocking task and
/// enforce their own deadline around it.
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image_path: &Path) -> Result<String, EngineError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("engine not available: {0}")]
    Unavailable(String),
    #[error("{0}")]
    Failed(String),
}
