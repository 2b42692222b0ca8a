mod document_kind;
mod job;
mod job_id;
mod job_status;

pub use document_kind::DocumentKind;
pub use job::{Job, JobResult};
pub use job_id::JobId;
pub use job_status::JobStatus;
