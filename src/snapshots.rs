//! Named snapshots of calculator inputs
//!
//! Snapshots are opaque to the engine: a saved input is returned exactly as
//! stored. The store keeps everything in memory and, when given a path,
//! rewrites the whole file after every change.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::calculator::CalcInput;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub id: String,
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub input: CalcInput,
}

/// Request body for saving a snapshot
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSnapshot {
    #[serde(default)]
    pub name: Option<String>,
    pub input: CalcInput,
}

#[derive(Debug)]
pub struct SnapshotStore {
    entries: DashMap<String, Snapshot>,
    path: Option<PathBuf>,
    // Serializes file rewrites
    write_lock: Mutex<()>,
}

impl SnapshotStore {
    /// Store without a backing file
    pub fn in_memory() -> Self {
        Self {
            entries: DashMap::new(),
            path: None,
            write_lock: Mutex::new(()),
        }
    }

    /// Open a file-backed store; a missing file starts empty
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        let entries = DashMap::new();

        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let saved: Vec<Snapshot> = serde_json::from_slice(&bytes).map_err(|e| {
                    AppError::StorageError(format!(
                        "Corrupt snapshot file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                for snapshot in saved {
                    entries.insert(snapshot.id.clone(), snapshot);
                }
                tracing::info!(path = %path.display(), count = entries.len(), "Loaded snapshots");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No snapshot file yet");
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Self {
            entries,
            path: Some(path),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All snapshots, oldest first
    pub fn list(&self) -> Vec<Snapshot> {
        let mut all: Vec<Snapshot> = self.entries.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.saved_at.cmp(&b.saved_at).then_with(|| a.id.cmp(&b.id)));
        all
    }

    pub fn get(&self, id: &str) -> Result<Snapshot, AppError> {
        self.entries
            .get(id)
            .map(|e| e.value().clone())
            .ok_or_else(|| AppError::SnapshotNotFound(id.to_string()))
    }

    /// Save an input; a blank name becomes `Save N`
    pub async fn save(&self, request: NewSnapshot) -> Result<Snapshot, AppError> {
        let _guard = self.write_lock.lock().await;
        let name = match request.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Save {}", self.entries.len() + 1),
        };

        let snapshot = Snapshot {
            id: Uuid::new_v4().to_string(),
            name,
            saved_at: Utc::now(),
            input: request.input,
        };

        self.entries.insert(snapshot.id.clone(), snapshot.clone());
        if let Err(e) = self.persist().await {
            self.entries.remove(&snapshot.id);
            return Err(e);
        }

        tracing::info!(id = %snapshot.id, name = %snapshot.name, "Snapshot saved");
        Ok(snapshot)
    }

    pub async fn delete(&self, id: &str) -> Result<Snapshot, AppError> {
        let _guard = self.write_lock.lock().await;
        let (_, removed) = self
            .entries
            .remove(id)
            .ok_or_else(|| AppError::SnapshotNotFound(id.to_string()))?;
        if let Err(e) = self.persist().await {
            self.entries.insert(removed.id.clone(), removed);
            return Err(e);
        }

        tracing::info!(id = %removed.id, "Snapshot deleted");
        Ok(removed)
    }

    /// Rewrite the backing file via a temp file and rename.
    /// Callers hold `write_lock` and undo their change on error.
    async fn persist(&self) -> Result<(), AppError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let body = serde_json::to_vec_pretty(&self.list())
            .map_err(|e| AppError::StorageError(e.to_string()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("json.tmp");
        let result = async {
            tokio::fs::write(&tmp, &body).await?;
            tokio::fs::rename(&tmp, path).await
        }
        .await;

        if let Err(e) = result {
            let _ = tokio::fs::remove_file(&tmp).await;
            tracing::error!(path = %path.display(), error = %e, "Failed to write snapshots");
            return Err(e.into());
        }

        Ok(())
    }
}
