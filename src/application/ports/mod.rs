mod job_queue;
mod job_repository;
mod ocr_engine;
mod page_renderer;
mod repository_error;

pub use job_queue::{JobQueue, QueueError, WorkItem};
pub use job_repository::JobRepository;
pub use ocr_engine::{EngineError, OcrEngine};
pub use page_renderer::{PageRenderer, RenderError};
pub use repository_error::RepositoryError;
