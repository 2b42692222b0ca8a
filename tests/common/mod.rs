#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tessera::application::ports::{
    EngineError, JobQueue, OcrEngine, PageRenderer, QueueError, RenderError, WorkItem,
};
use tessera::application::services::{BoundedOcr, OcrPipeline};

pub const TEST_PAGE_TIMEOUT: Duration = Duration::from_millis(200);
pub const TEST_JOB_TIMEOUT: Duration = Duration::from_secs(30);
pub const TEST_MAX_PAGES: usize = 20;

/// Engine scripted by page-file content: a page containing "slow" sleeps past
/// the per-page timeout before answering, one containing "broken" errors,
/// anything else echoes back recognized text.
pub struct ScriptedEngine;

impl OcrEngine for ScriptedEngine {
    fn recognize(&self, image_path: &Path) -> Result<String, EngineError> {
        let marker = std::fs::read_to_string(image_path)
            .map_err(|e| EngineError::Failed(format!("cannot read page: {}", e)))?;

        if marker.contains("slow") {
            std::thread::sleep(TEST_PAGE_TIMEOUT * 5);
        }
        if marker.contains("broken") {
            return Err(EngineError::Failed("engine exploded".to_string()));
        }

        Ok(format!("recognized {}", marker.trim()))
    }
}

pub enum StubDocument {
    Pages(Vec<&'static str>),
    Empty,
    Encrypted,
    Corrupted,
}

/// Renderer that materializes scripted page markers as real temp files and
/// records every path it created, so tests can assert cleanup.
pub struct StubRenderer {
    pub document: StubDocument,
    pub created: Arc<Mutex<Vec<PathBuf>>>,
}

impl StubRenderer {
    pub fn new(document: StubDocument) -> Self {
        Self {
            document,
            created: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn created_paths(&self) -> Vec<PathBuf> {
        self.created.lock().unwrap().clone()
    }
}

impl PageRenderer for StubRenderer {
    fn render(&self, _pdf_path: &Path, max_pages: usize) -> Result<Vec<PathBuf>, RenderError> {
        let markers = match &self.document {
            StubDocument::Pages(markers) => markers,
            StubDocument::Empty => return Err(RenderError::Empty),
            StubDocument::Encrypted => return Err(RenderError::Encrypted),
            StubDocument::Corrupted => {
                return Err(RenderError::Corrupted(
                    "invalid or malformed PDF structure".to_string(),
                ))
            }
        };

        let mut paths = Vec::new();
        for marker in markers.iter().take(max_pages) {
            let mut file = tempfile::Builder::new()
                .prefix("stub-page-")
                .suffix(".png")
                .tempfile()
                .unwrap();
            file.write_all(marker.as_bytes()).unwrap();
            let (_, path) = file.keep().unwrap();
            self.created.lock().unwrap().push(path.clone());
            paths.push(path);
        }
        Ok(paths)
    }
}

/// Queue double that records enqueued items, optionally refusing them all.
pub struct RecordingQueue {
    pub items: Arc<Mutex<Vec<WorkItem>>>,
    pub refuse: bool,
}

impl RecordingQueue {
    pub fn accepting() -> Self {
        Self {
            items: Arc::new(Mutex::new(Vec::new())),
            refuse: false,
        }
    }

    pub fn refusing() -> Self {
        Self {
            items: Arc::new(Mutex::new(Vec::new())),
            refuse: true,
        }
    }

    pub fn recorded(&self) -> Vec<WorkItem> {
        self.items.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl JobQueue for RecordingQueue {
    async fn enqueue(&self, item: WorkItem) -> Result<(), QueueError> {
        if self.refuse {
            return Err(QueueError::Unavailable("broker unreachable".to_string()));
        }
        self.items.lock().unwrap().push(item);
        Ok(())
    }
}

pub fn test_pipeline(renderer: Arc<dyn PageRenderer>) -> OcrPipeline {
    OcrPipeline::new(
        BoundedOcr::new(Arc::new(ScriptedEngine), TEST_PAGE_TIMEOUT),
        renderer,
        TEST_MAX_PAGES,
        TEST_JOB_TIMEOUT,
    )
}

/// Stage a fake upload in a temp dir, returning the kept path.
pub fn stage_input(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
