mod in_memory_job_repository;
mod redis_job_repository;

pub use in_memory_job_repository::InMemoryJobRepository;
pub use redis_job_repository::RedisJobRepository;
