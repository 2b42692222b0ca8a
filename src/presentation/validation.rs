use crate::domain::DocumentKind;

/// Upload validation, evaluated strictly before the submitter is invoked.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("File size exceeds {0} MB limit")]
    TooLarge(usize),
    #[error("Missing filename")]
    MissingFilename,
}

pub fn validate_upload(
    filename: &str,
    size_bytes: usize,
    max_file_size_mb: usize,
) -> Result<DocumentKind, ValidationError> {
    if filename.is_empty() {
        return Err(ValidationError::MissingFilename);
    }

    let kind = DocumentKind::from_filename(filename).ok_or_else(|| {
        let ext = filename.rsplit('.').next().unwrap_or(filename);
        ValidationError::UnsupportedType(ext.to_lowercase())
    })?;

    if size_bytes > max_file_size_mb * 1024 * 1024 {
        return Err(ValidationError::TooLarge(max_file_size_mb));
    }

    Ok(kind)
}
