mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AuthSettings, LimitsSettings, LoggingSettings, OcrSettings, QueueSettings, RateLimitSettings,
    RedisSettings, ServerSettings, Settings,
};
