use std::path::{Path, PathBuf};

use image::ImageFormat;
use pdfium_render::prelude::*;

use crate::application::ports::{PageRenderer, RenderError};

/// Rasterizes PDF pages to temp PNG files with pdfium, capped at
/// `max_pages`. Pages beyond the cap are silently skipped.
pub struct PdfiumRenderer {
    render_dpi: f32,
}

impl PdfiumRenderer {
    pub fn new(render_dpi: f32) -> Self {
        Self { render_dpi }
    }

    fn render_page_to_file(
        &self,
        page: &PdfPage,
        index: usize,
    ) -> Result<PathBuf, RenderError> {
        let width = (page.width().value * self.render_dpi / 72.0) as i32;
        let height = (page.height().value * self.render_dpi / 72.0) as i32;

        let bitmap = page
            .render_with_config(
                &PdfRenderConfig::new()
                    .set_target_width(width)
                    .set_target_height(height),
            )
            .map_err(|e| {
                RenderError::Renderer(format!("render page {} failed: {}", index + 1, e))
            })?;

        let temp_file = tempfile::Builder::new()
            .prefix("ocr-page-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| RenderError::Renderer(format!("cannot create page file: {}", e)))?;
        let (_, path) = temp_file
            .keep()
            .map_err(|e| RenderError::Renderer(format!("cannot keep page file: {}", e)))?;

        bitmap
            .as_image()
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| {
                let _ = std::fs::remove_file(&path);
                RenderError::Renderer(format!("PNG encode page {} failed: {}", index + 1, e))
            })?;

        Ok(path)
    }
}

impl PageRenderer for PdfiumRenderer {
    fn render(&self, pdf_path: &Path, max_pages: usize) -> Result<Vec<PathBuf>, RenderError> {
        let pdfium = Pdfium::new(
            Pdfium::bind_to_system_library()
                .map_err(|e| RenderError::Renderer(format!("pdfium bind failed: {}", e)))?,
        );

        let doc = pdfium
            .load_pdf_from_file(pdf_path, None)
            .map_err(classify_open_error)?;

        let page_count = doc.pages().len() as usize;
        if page_count == 0 {
            return Err(RenderError::Empty);
        }

        let pages_to_render = page_count.min(max_pages);
        let mut rendered: Vec<PathBuf> = Vec::with_capacity(pages_to_render);

        for index in 0..pages_to_render {
            let outcome = doc
                .pages()
                .get(index as u16)
                .map_err(|e| {
                    RenderError::Renderer(format!("page {} access failed: {}", index + 1, e))
                })
                .and_then(|page| self.render_page_to_file(&page, index));

            match outcome {
                Ok(path) => rendered.push(path),
                Err(e) => {
                    // Pages rendered so far were never handed to the caller's
                    // manifest; remove them before bailing.
                    for path in &rendered {
                        let _ = std::fs::remove_file(path);
                    }
                    return Err(e);
                }
            }
        }

        Ok(rendered)
    }
}

fn classify_open_error(error: PdfiumError) -> RenderError {
    match error {
        PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError)
        | PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::SecurityError) => {
            RenderError::Encrypted
        }
        PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::FormatError) => {
            RenderError::Corrupted("invalid or malformed PDF structure".to_string())
        }
        other => RenderError::Corrupted(other.to_string()),
    }
}
