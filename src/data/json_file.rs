//! JSON snapshot file persistence.
//!
//! The whole store is one pretty-printed JSON document. Saves write a sibling
//! temp file and rename it over the target.

use crate::domain::repository::SnapshotPersistence;
use crate::domain::snapshot::Snapshot;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "snapshot".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SnapshotPersistence for JsonFilePersistence {
    /// A missing file is an empty store. An unparsable document is logged and
    /// also treated as empty.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Option<Snapshot>> {
        if !tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            debug!("No snapshot file yet");
            return Ok(None);
        }

        let raw = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        match serde_json::from_slice::<Snapshot>(&raw) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                warn!(error = %e, "Failed to parse snapshot, starting empty");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, snapshot), fields(path = %self.path.display()))]
    async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let body = serde_json::to_vec_pretty(snapshot).context("Failed to encode snapshot")?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &body)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        debug!(bytes = body.len(), "Snapshot written");
        Ok(())
    }
}
