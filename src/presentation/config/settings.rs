use config::{Config, ConfigError, Environment as EnvironmentSource, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub redis: RedisSettings,
    pub queue: QueueSettings,
    pub ocr: OcrSettings,
    pub limits: LimitsSettings,
    pub auth: AuthSettings,
    pub rate_limit: RateLimitSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueueSettings {
    pub capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrSettings {
    pub tesseract_cmd: String,
    pub staging_dir: String,
    pub max_pdf_pages: usize,
    pub timeout_per_page_secs: u64,
    pub job_timeout_secs: u64,
    pub result_ttl_secs: u64,
    pub render_dpi: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsSettings {
    pub max_file_size_mb: usize,
}

impl LimitsSettings {
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub enabled: bool,
    pub header: String,
    pub api_keys: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitSettings {
    pub enabled: bool,
    pub max_requests: u32,
    pub window_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub json: bool,
}

impl Settings {
    /// Layered load: coded defaults, then `appsettings.{environment}.toml`
    /// if present, then `APP__`-prefixed environment variables.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("redis.url", "redis://localhost:6379")?
            .set_default("queue.capacity", 128)?
            .set_default("ocr.tesseract_cmd", "tesseract")?
            .set_default("ocr.staging_dir", "/tmp/tessera-staging")?
            .set_default("ocr.max_pdf_pages", 20)?
            .set_default("ocr.timeout_per_page_secs", 10)?
            .set_default("ocr.job_timeout_secs", 300)?
            .set_default("ocr.result_ttl_secs", 86_400)?
            .set_default("ocr.render_dpi", 200.0)?
            .set_default("limits.max_file_size_mb", 10)?
            .set_default("auth.enabled", false)?
            .set_default("auth.header", "x-api-key")?
            .set_default("auth.api_keys", Vec::<String>::new())?
            .set_default("rate_limit.enabled", true)?
            .set_default("rate_limit.max_requests", 10)?
            .set_default("rate_limit.window_secs", 60)?
            .set_default("logging.json", false)?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .separator("__")
                    .list_separator(","),
            )
            .build()?
            .try_deserialize()
    }
}
