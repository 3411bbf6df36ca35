//! Artifact store and snapshot backup
//!
//! One artifact per component kind, last-writer-wins, no locking. Safe only
//! because writes occur strictly sequentially within one run; concurrent runs
//! against the same store are unsupported.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sitewright_core::{ComponentKind, Result, SitewrightError};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::fs;

/// Handle describing a completed snapshot backup.
///
/// Rollback aid only; nothing in the pipeline restores from it
/// automatically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupHandle {
    /// Where the snapshot lives
    pub location: String,
    /// Number of artifacts captured
    pub artifacts: usize,
    /// When the snapshot was taken
    pub created_at: DateTime<Utc>,
}

/// Persistence for generated artifacts.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persist the artifact for a kind, replacing any previous one.
    async fn write(&self, kind: ComponentKind, text: &str) -> Result<()>;

    /// Read the artifact for a kind, `None` when absent.
    async fn read(&self, kind: ComponentKind) -> Result<Option<String>>;

    /// Snapshot-copy the current artifact set.
    async fn snapshot(&self) -> Result<BackupHandle>;
}

/// Filesystem-backed artifact store.
///
/// Artifacts live as `{Identifier}.jsx` under the base directory; snapshots
/// are copied into `backups/{timestamp}/`.
pub struct FsArtifactStore {
    base_dir: PathBuf,
}

impl FsArtifactStore {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    fn artifact_path(&self, kind: ComponentKind) -> PathBuf {
        self.base_dir.join(format!("{}.jsx", kind.identifier()))
    }
}

#[async_trait]
impl ArtifactStore for FsArtifactStore {
    async fn write(&self, kind: ComponentKind, text: &str) -> Result<()> {
        fs::create_dir_all(&self.base_dir).await.map_err(|e| {
            SitewrightError::Store(format!(
                "Failed to create artifact directory {}: {}",
                self.base_dir.display(),
                e
            ))
        })?;

        let path = self.artifact_path(kind);
        fs::write(&path, text).await.map_err(|e| {
            SitewrightError::Store(format!("Failed to write {}: {}", path.display(), e))
        })?;

        tracing::debug!("Persisted {} artifact to {}", kind, path.display());
        Ok(())
    }

    async fn read(&self, kind: ComponentKind) -> Result<Option<String>> {
        let path = self.artifact_path(kind);
        match fs::read_to_string(&path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SitewrightError::Store(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn snapshot(&self) -> Result<BackupHandle> {
        let created_at = Utc::now();
        let backup_dir = self
            .base_dir
            .join("backups")
            .join(created_at.format("%Y%m%d-%H%M%S").to_string());

        fs::create_dir_all(&backup_dir).await.map_err(|e| {
            SitewrightError::Store(format!(
                "Failed to create backup directory {}: {}",
                backup_dir.display(),
                e
            ))
        })?;

        let mut copied = 0;
        for kind in ComponentKind::ALL {
            let source = self.artifact_path(kind);
            if source.exists() {
                let target = backup_dir.join(format!("{}.jsx", kind.identifier()));
                fs::copy(&source, &target).await.map_err(|e| {
                    SitewrightError::Store(format!(
                        "Failed to copy {} into backup: {}",
                        source.display(),
                        e
                    ))
                })?;
                copied += 1;
            }
        }

        tracing::info!(
            "Snapshot of {} artifacts at {}",
            copied,
            backup_dir.display()
        );

        Ok(BackupHandle {
            location: backup_dir.display().to_string(),
            artifacts: copied,
            created_at,
        })
    }
}

/// In-memory artifact store for tests.
#[derive(Debug, Default)]
pub struct MemoryArtifactStore {
    artifacts: Mutex<HashMap<ComponentKind, String>>,
    snapshots_taken: Mutex<usize>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.artifacts.lock().expect("store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshots_taken(&self) -> usize {
        *self.snapshots_taken.lock().expect("store mutex poisoned")
    }
}

#[async_trait]
impl ArtifactStore for MemoryArtifactStore {
    async fn write(&self, kind: ComponentKind, text: &str) -> Result<()> {
        self.artifacts
            .lock()
            .expect("store mutex poisoned")
            .insert(kind, text.to_string());
        Ok(())
    }

    async fn read(&self, kind: ComponentKind) -> Result<Option<String>> {
        Ok(self
            .artifacts
            .lock()
            .expect("store mutex poisoned")
            .get(&kind)
            .cloned())
    }

    async fn snapshot(&self) -> Result<BackupHandle> {
        let artifacts = self.artifacts.lock().expect("store mutex poisoned").len();
        *self.snapshots_taken.lock().expect("store mutex poisoned") += 1;
        Ok(BackupHandle {
            location: "memory".to_string(),
            artifacts,
            created_at: Utc::now(),
        })
    }
}
