use std::path::Path;
use std::process::Command;

use crate::application::ports::{EngineError, OcrEngine};

/// OCR engine wrapping the `tesseract` CLI.
///
/// Tesseract takes an output base path and writes `<base>.txt` next to it;
/// we base it on the input image so the text lands in the same temp
/// directory and is removed here once read.
pub struct TesseractEngine {
    command: String,
}

impl TesseractEngine {
    pub fn new(command: String) -> Self {
        Self { command }
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, image_path: &Path) -> Result<String, EngineError> {
        let output_base = image_path.with_extension("");
        let output_txt = image_path.with_extension("txt");

        let output = Command::new(&self.command)
            .arg(image_path)
            .arg(&output_base)
            .output()
            .map_err(|e| {
                EngineError::Unavailable(format!("cannot run {}: {}", self.command, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EngineError::Failed(stderr.trim().to_string()));
        }

        let text = std::fs::read_to_string(&output_txt)
            .map_err(|e| EngineError::Failed(format!("cannot read engine output: {}", e)))?;

        if let Err(e) = std::fs::remove_file(&output_txt) {
            tracing::debug!(path = %output_txt.display(), error = %e, "Could not remove engine output file");
        }

        Ok(text.trim().to_string())
    }
}
