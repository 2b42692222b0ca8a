use std::path::Path;

/// Document classification by filename suffix. Doubles as the upload
/// whitelist: anything this cannot classify is rejected before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Png,
    Jpeg,
    Pdf,
}

impl DocumentKind {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename).extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "png" => Some(DocumentKind::Png),
            "jpg" | "jpeg" => Some(DocumentKind::Jpeg),
            "pdf" => Some(DocumentKind::Pdf),
            _ => None,
        }
    }

    pub fn is_pdf(&self) -> bool {
        matches!(self, DocumentKind::Pdf)
    }
}
