use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::store::{ProjectStore, StoreResult};
use crate::{ProjectFiles, ProjectRecord, ProjectSummary, SaveResult, StoreError};

/// Process-local project store. Contents are lost when the process exits.
#[derive(Default)]
pub struct InMemoryProjectStore {
    projects: RwLock<IndexMap<String, ProjectRecord>>,
}

impl InMemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn save(&self, id: &str, files: ProjectFiles) -> SaveResult {
        let mut projects = self.projects.write().await;
        let files_count = files.len();
        let replaced = projects
            .insert(id.to_string(), ProjectRecord::new(id, files))
            .is_some();

        tracing::debug!(project_id = id, files_count, replaced, "project saved");

        SaveResult {
            project_id: id.to_string(),
            files_count,
        }
    }

    async fn load(&self, id: &str) -> StoreResult<ProjectRecord> {
        self.projects
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn list(&self) -> Vec<ProjectSummary> {
        self.projects
            .read()
            .await
            .values()
            .map(ProjectRecord::summary)
            .collect()
    }
}
