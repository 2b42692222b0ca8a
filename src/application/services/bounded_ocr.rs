use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::OcrEngine;

/// Runs one blocking engine call under a wall-clock deadline.
///
/// The call is moved onto a blocking task and raced against a timer. When the
/// deadline elapses first the caller gets `OcrCallError::Timeout` and moves
/// on, but the underlying engine call is NOT stopped: it may keep consuming a
/// blocking thread until it returns on its own. Best-effort bound, not
/// cancellation.
pub struct BoundedOcr {
    engine: Arc<dyn OcrEngine>,
    timeout: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum OcrCallError {
    #[error("processing timed out")]
    Timeout,
    #[error("OCR engine error: {0}")]
    Engine(String),
}

impl BoundedOcr {
    pub fn new(engine: Arc<dyn OcrEngine>, timeout: Duration) -> Self {
        Self { engine, timeout }
    }

    pub async fn run(&self, image_path: &Path) -> Result<String, OcrCallError> {
        let engine = Arc::clone(&self.engine);
        let path = image_path.to_path_buf();

        let call = tokio::task::spawn_blocking(move || engine.recognize(&path));

        match tokio::time::timeout(self.timeout, call).await {
            Err(_) => Err(OcrCallError::Timeout),
            Ok(Err(join_err)) => Err(OcrCallError::Engine(join_err.to_string())),
            Ok(Ok(Err(engine_err))) => Err(OcrCallError::Engine(engine_err.to_string())),
            Ok(Ok(Ok(text))) => Ok(text),
        }
    }
}
