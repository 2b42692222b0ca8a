use std::sync::Arc;

use crate::application::ports::JobRepository;
use crate::application::services::{StatusService, SubmissionService};
use crate::presentation::config::Settings;
use crate::presentation::middleware::RateLimiter;

pub struct AppState {
    pub submission_service: Arc<SubmissionService>,
    pub status_service: Arc<StatusService>,
    pub job_repository: Arc<dyn JobRepository>,
    pub rate_limiter: RateLimiter,
    pub settings: Settings,
}

impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            submission_service: Arc::clone(&self.submission_service),
            status_service: Arc::clone(&self.status_service),
            job_repository: Arc::clone(&self.job_repository),
            rate_limiter: self.rate_limiter.clone(),
            settings: self.settings.clone(),
        }
    }
}
