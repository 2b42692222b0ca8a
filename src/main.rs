use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use redis::aio::ConnectionManager;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use tessera::application::ports::{JobQueue, JobRepository, OcrEngine, PageRenderer};
use tessera::application::services::{
    BoundedOcr, OcrPipeline, OcrWorker, StatusService, SubmissionService,
};
use tessera::infrastructure::observability::{init_tracing, TracingConfig};
use tessera::infrastructure::ocr::TesseractEngine;
use tessera::infrastructure::pdf::PdfiumRenderer;
use tessera::infrastructure::persistence::RedisJobRepository;
use tessera::infrastructure::queue::ChannelJobQueue;
use tessera::presentation::middleware::RateLimiter;
use tessera::presentation::{create_router, AppState, Environment, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        TracingConfig {
            environment: environment.to_string(),
            json_format: settings.logging.json,
        },
        settings.server.port,
    );

    // One Redis handle for the whole process, built here and injected.
    let redis_client =
        redis::Client::open(settings.redis.url.as_str()).context("Invalid Redis URL")?;
    let redis_conn = ConnectionManager::new(redis_client)
        .await
        .context("Failed to connect to Redis")?;
    let repository: Arc<dyn JobRepository> = Arc::new(RedisJobRepository::new(
        redis_conn,
        settings.ocr.result_ttl_secs,
    ));

    let (work_tx, work_rx) = mpsc::channel(settings.queue.capacity);
    let queue: Arc<dyn JobQueue> = Arc::new(ChannelJobQueue::new(work_tx));

    let engine: Arc<dyn OcrEngine> = Arc::new(TesseractEngine::new(
        settings.ocr.tesseract_cmd.clone(),
    ));
    let renderer: Arc<dyn PageRenderer> = Arc::new(PdfiumRenderer::new(settings.ocr.render_dpi));

    let pipeline = Arc::new(OcrPipeline::new(
        BoundedOcr::new(engine, Duration::from_secs(settings.ocr.timeout_per_page_secs)),
        renderer,
        settings.ocr.max_pdf_pages,
        Duration::from_secs(settings.ocr.job_timeout_secs),
    ));

    let worker = OcrWorker::new(work_rx, Arc::clone(&pipeline), Arc::clone(&repository));
    tokio::spawn(worker.run());

    let submission_service = Arc::new(SubmissionService::new(
        PathBuf::from(&settings.ocr.staging_dir),
        queue,
        Arc::clone(&repository),
    )?);
    let status_service = Arc::new(StatusService::new(Arc::clone(&repository)));

    let state = AppState {
        submission_service,
        status_service,
        job_repository: repository,
        rate_limiter: RateLimiter::default(),
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
