//! Storage trait

use async_trait::async_trait;

use crate::{ProjectFiles, ProjectRecord, ProjectSummary, SaveResult, StoreError};

pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed project storage.
///
/// Each call is atomic with respect to the others. Concurrent saves to the
/// same identifier resolve as last-writer-wins.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Create or fully replace the record for `id`, stamping it with the
    /// current time.
    async fn save(&self, id: &str, files: ProjectFiles) -> SaveResult;

    /// Fetch the whole record for `id`.
    async fn load(&self, id: &str) -> StoreResult<ProjectRecord>;

    /// Summaries of every stored project, in store iteration order.
    async fn list(&self) -> Vec<ProjectSummary>;
}
