//! Per-request dataset acquisition.
//!
//! # Responsibilities
//! - Hand each request a dataset snapshot
//! - In `fresh` mode, reload the file on every call
//! - In `mtime` mode, reuse the last parse until the file's modification time changes
//!
//! # Design Decisions
//! - Snapshots are `Arc<Dataset>`; lookups only ever borrow them
//! - The cached snapshot is published through `ArcSwapOption`, so readers never lock
//! - Two racing reloads may both parse the file; the last store wins

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use arc_swap::ArcSwapOption;
use serde::{Deserialize, Serialize};

use crate::data::loader;
use crate::data::record::Dataset;
use crate::observability::metrics;

/// How the backing file is re-read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReloadMode {
    /// Read the file on every request.
    #[default]
    Fresh,
    /// Re-read only when the file's modification time changes.
    Mtime,
}

struct Snapshot {
    modified: SystemTime,
    dataset: Arc<Dataset>,
}

/// Source of datasets for the lookup handlers.
pub struct DataSource {
    path: PathBuf,
    mode: ReloadMode,
    cached: ArcSwapOption<Snapshot>,
}

impl DataSource {
    pub fn new(path: impl Into<PathBuf>, mode: ReloadMode) -> Self {
        Self {
            path: path.into(),
            mode,
            cached: ArcSwapOption::empty(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> ReloadMode {
        self.mode
    }

    /// Get the dataset for one request.
    pub async fn snapshot(&self) -> Arc<Dataset> {
        let dataset = match self.mode {
            ReloadMode::Fresh => Arc::new(loader::load(&self.path).await),
            ReloadMode::Mtime => self.cached_snapshot().await,
        };
        metrics::record_dataset_size(dataset.len());
        dataset
    }

    async fn cached_snapshot(&self) -> Arc<Dataset> {
        let modified = match tokio::fs::metadata(&self.path).await.and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "Error loading NID data");
                self.cached.store(None);
                return Arc::new(Vec::new());
            }
        };

        if let Some(snapshot) = self.cached.load_full() {
            if snapshot.modified == modified {
                return snapshot.dataset.clone();
            }
        }

        tracing::info!(path = %self.path.display(), "NID data changed on disk, reloading");
        let dataset = Arc::new(loader::load(&self.path).await);
        self.cached.store(Some(Arc::new(Snapshot {
            modified,
            dataset: dataset.clone(),
        })));
        dataset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn write(path: &Path, contents: &str, modified: SystemTime) {
        std::fs::write(path, contents).unwrap();
        let file = std::fs::File::options().write(true).open(path).unwrap();
        file.set_modified(modified).unwrap();
    }

    #[tokio::test]
    async fn test_fresh_mode_sees_every_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nids.json");
        let t0 = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);

        let source = DataSource::new(&path, ReloadMode::Fresh);
        write(&path, r#"[{"id": 1}]"#, t0);
        assert_eq!(source.snapshot().await.len(), 1);

        // Same mtime, different content: fresh mode must still notice.
        write(&path, r#"[{"id": 1}, {"id": 2}]"#, t0);
        assert_eq!(source.snapshot().await.len(), 2);
    }

    #[tokio::test]
    async fn test_mtime_mode_reuses_until_modified() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nids.json");
        let t0 = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
        let t1 = t0 + Duration::from_secs(60);

        let source = DataSource::new(&path, ReloadMode::Mtime);
        write(&path, r#"[{"id": 1}]"#, t0);
        let first = source.snapshot().await;
        assert_eq!(first.len(), 1);

        write(&path, r#"[{"id": 1}, {"id": 2}]"#, t0);
        let second = source.snapshot().await;
        assert!(Arc::ptr_eq(&first, &second));

        write(&path, r#"[{"id": 1}, {"id": 2}]"#, t1);
        assert_eq!(source.snapshot().await.len(), 2);
    }

    #[tokio::test]
    async fn test_mtime_mode_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let source = DataSource::new(dir.path().join("absent.json"), ReloadMode::Mtime);

        assert!(source.snapshot().await.is_empty());
    }
}
