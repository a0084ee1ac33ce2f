//! Per-job temporary workspace with tracked teardown.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use reel_models::JobId;
use tracing::{debug, warn};

/// Owns every temporary path one compose job creates.
///
/// Paths are tracked the moment they are reserved, not once a stage
/// succeeds, so a mid-pipeline failure still tears down everything
/// created up to that point. Teardown removes each tracked path exactly
/// once; individual deletion failures are logged and swallowed so one
/// unlinkable file never masks the job's real outcome or blocks the
/// remaining removals.
#[derive(Debug)]
pub struct JobWorkspace {
    root: PathBuf,
    tracked: Mutex<Vec<PathBuf>>,
}

impl JobWorkspace {
    /// Create a workspace directory exclusive to one job.
    pub async fn create(work_dir: impl AsRef<Path>, job_id: &JobId) -> std::io::Result<Self> {
        let root = work_dir.as_ref().join(format!("job-{}", job_id));
        tokio::fs::create_dir_all(&root).await?;
        debug!(root = %root.display(), "Created job workspace");
        Ok(Self {
            root,
            tracked: Mutex::new(Vec::new()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reserve a file path inside the workspace and track it for
    /// teardown. The file itself may or may not ever be created;
    /// teardown treats a missing file as already done.
    pub fn tracked_path(&self, file_name: &str) -> PathBuf {
        let path = self.root.join(file_name);
        self.track(path.clone());
        path
    }

    /// Track an externally created path for teardown.
    pub fn track(&self, path: PathBuf) {
        self.tracked
            .lock()
            .expect("workspace tracking lock poisoned")
            .push(path);
    }

    pub fn tracked_count(&self) -> usize {
        self.tracked
            .lock()
            .expect("workspace tracking lock poisoned")
            .len()
    }

    /// Remove every tracked path, then the workspace directory itself.
    /// Runs on every pipeline exit path; never fails.
    pub async fn cleanup(&self) {
        let paths: Vec<PathBuf> = {
            let mut tracked = self
                .tracked
                .lock()
                .expect("workspace tracking lock poisoned");
            tracked.drain(..).collect()
        };

        for path in paths {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to remove temp file");
                }
            }
        }

        match tokio::fs::remove_dir_all(&self.root).await {
            Ok(()) => debug!(root = %self.root.display(), "Removed job workspace"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(root = %self.root.display(), error = %e, "Failed to remove job workspace");
            }
        }
    }
}
