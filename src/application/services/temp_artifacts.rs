use std::path::PathBuf;

/// Per-job manifest of transient files created during one pipeline run.
///
/// Every artifact registers itself here; the pipeline's finalizer calls
/// `cleanup` on every exit path. Deletion is best-effort: absence is not an
/// error, other failures are logged and never raised.
#[derive(Debug, Default)]
pub struct TempArtifacts {
    manifest: Vec<PathBuf>,
}

impl TempArtifacts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, path: PathBuf) {
        self.manifest.push(path);
    }

    pub fn cleanup(&self) {
        for path in &self.manifest {
            match std::fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to remove temp artifact");
                }
            }
        }
    }
}
