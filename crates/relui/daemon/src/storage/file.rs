//! File-backed storage implementation
//!
//! Each run is a JSON document named `<run id>.json`. Writes go to a
//! temporary file that is synced and renamed into place before
//! `add_workflow` returns, so a crash never leaves a half-written run.

use super::traits::*;
use crate::error::StorageError;
use async_trait::async_trait;
use relui_types::{BuildableTask, TaskId, WorkflowId, WorkflowRun};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

/// Directory of JSON run documents
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    workflows: RwLock<HashMap<WorkflowId, WorkflowRun>>,
}

impl FileStore {
    /// Open the store, creating `dir` if needed and loading every run in it
    pub async fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;

        let mut workflows = HashMap::new();
        let mut entries = fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let bytes = fs::read(&path).await?;
            let run: WorkflowRun = serde_json::from_slice(&bytes).map_err(|e| {
                StorageError::InvalidData(format!("{}: {}", path.display(), e))
            })?;
            workflows.insert(run.id.clone(), run);
        }

        tracing::info!(dir = %dir.display(), runs = workflows.len(), "Opened file store");

        Ok(Self {
            dir,
            workflows: RwLock::new(workflows),
        })
    }

    fn run_path(&self, id: &WorkflowId) -> Result<PathBuf, StorageError> {
        let name = id.as_str();
        let safe = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !safe {
            return Err(StorageError::InvalidData(format!(
                "workflow id '{}' is not a valid file name",
                name
            )));
        }
        Ok(self.dir.join(format!("{}.json", name)))
    }

    async fn persist(&self, run: &WorkflowRun) -> StorageResult<()> {
        let path = self.run_path(&run.id)?;
        let bytes = serde_json::to_vec_pretty(run)
            .map_err(|e| StorageError::InvalidData(e.to_string()))?;

        let tmp_path = path.with_extension("json.tmp");
        if let Err(e) = write_then_rename(&tmp_path, &path, &bytes).await {
            if let Err(cleanup) = fs::remove_file(&tmp_path).await {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %tmp_path.display(), error = %cleanup, "Failed to remove temporary run file");
                }
            }
            return Err(e.into());
        }
        Ok(())
    }
}

async fn write_then_rename(tmp_path: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(tmp_path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(tmp_path, path).await
}

#[async_trait]
impl WorkflowStore for FileStore {
    async fn workflows(&self) -> StorageResult<Vec<WorkflowRun>> {
        let workflows = self.workflows.read().await;
        Ok(workflows.values().cloned().collect())
    }

    async fn workflow(&self, id: &WorkflowId) -> StorageResult<Option<WorkflowRun>> {
        let workflows = self.workflows.read().await;
        Ok(workflows.get(id).cloned())
    }

    async fn buildable_task(
        &self,
        workflow_id: &WorkflowId,
        task_id: &TaskId,
    ) -> StorageResult<Option<BuildableTask>> {
        let workflows = self.workflows.read().await;
        Ok(workflows
            .get(workflow_id)
            .and_then(|run| run.task(task_id))
            .cloned())
    }

    async fn add_workflow(&self, run: WorkflowRun) -> StorageResult<()> {
        // Held across the write so two adds of the same id cannot both succeed.
        let mut workflows = self.workflows.write().await;
        if workflows.contains_key(&run.id) {
            return Err(StorageError::Conflict(format!("workflow {} already exists", run.id)));
        }

        self.persist(&run).await?;
        workflows.insert(run.id.clone(), run);
        Ok(())
    }
}
