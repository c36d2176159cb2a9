/// Repository layer for the cached snapshot
use crate::domain::Snapshot;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Persistence for the gallery snapshot
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Last saved snapshot, or the empty skeleton when none is readable
    async fn load(&self) -> Snapshot;

    /// Replace the stored snapshot
    async fn save(&self, snapshot: &Snapshot) -> AppResult<()>;
}

/// Snapshot kept as a single JSON document on disk
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read(&self) -> AppResult<Snapshot> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl SnapshotStore for JsonFileStore {
    async fn load(&self) -> Snapshot {
        match self.read().await {
            Ok(snapshot) => {
                info!(
                    "Loaded cache {} (date {:?}, {} rovers)",
                    self.path.display(),
                    snapshot.date,
                    snapshot.rover_entries.len()
                );
                snapshot
            }
            Err(AppError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                info!("No cache at {}, starting empty", self.path.display());
                Snapshot::default()
            }
            Err(e) => {
                warn!("Couldn't read cache {}: {}", self.path.display(), e);
                Snapshot::default()
            }
        }
    }

    async fn save(&self, snapshot: &Snapshot) -> AppResult<()> {
        let data = serde_json::to_vec(snapshot)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Write beside the target then rename, so a failed write keeps the old file
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &data).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        debug!("Wrote {} bytes to {}", data.len(), self.path.display());
        Ok(())
    }
}
