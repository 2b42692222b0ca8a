mod api_key;
mod rate_limit;

pub use api_key::api_key_middleware;
pub use rate_limit::{rate_limit_middleware, RateLimiter};
