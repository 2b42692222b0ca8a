mod bounded_ocr;
mod ocr_pipeline;
mod ocr_worker;
mod status_service;
mod submission_service;
mod temp_artifacts;

pub use bounded_ocr::{BoundedOcr, OcrCallError};
pub use ocr_pipeline::OcrPipeline;
pub use ocr_worker::OcrWorker;
pub use status_service::{JobView, StatusService};
pub use submission_service::{SubmissionService, SubmitError};
pub use temp_artifacts::TempArtifacts;
