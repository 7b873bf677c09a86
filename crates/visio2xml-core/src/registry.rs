//! File registry: the single source of truth for upload lifecycle state.
//!
//! The registry owns all `FileEntry` records. Lifecycle transitions are
//! exposed as atomic compare-and-set operations so callers never read, decide,
//! and write in separate steps; that is what keeps a second `convert` call (or
//! a delete racing an in-flight conversion) from producing lost updates.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{FileEntry, FileStatus};

/// Store abstraction over file entries.
///
/// Handlers and the conversion worker hold an `Arc<dyn FileRegistry>` so the
/// in-memory implementation can be swapped for a persistent one (or a test
/// fake) without touching callers.
#[async_trait]
pub trait FileRegistry: Send + Sync {
    /// Register a new entry. Fails if the id is already present.
    async fn insert(&self, entry: FileEntry) -> AppResult<()>;

    /// Fetch a snapshot of an entry.
    async fn get(&self, id: Uuid) -> AppResult<FileEntry>;

    /// Snapshot of all entries, newest first.
    async fn list(&self) -> Vec<FileEntry>;

    /// Remove an entry, returning its final snapshot.
    async fn remove(&self, id: Uuid) -> AppResult<FileEntry>;

    /// Atomically transition `Uploaded -> Converting`.
    ///
    /// Returns the updated snapshot. Fails with `NotFound` for unknown ids and
    /// `InvalidState` when the entry is not in `Uploaded` - this is what makes
    /// a duplicate convert call observable as exactly one acceptance.
    async fn begin_conversion(&self, id: Uuid) -> AppResult<FileEntry>;

    /// Transition `Converting -> Completed`, recording the artifact name.
    ///
    /// A no-op when the entry has been deleted mid-flight or is already
    /// terminal; the worker must never fail over a racing delete.
    async fn complete_conversion(&self, id: Uuid, converted_name: String) -> AppResult<()>;

    /// Transition `Converting -> Failed`, recording the failure reason.
    ///
    /// Same no-op rule as [`FileRegistry::complete_conversion`].
    async fn fail_conversion(&self, id: Uuid, message: String) -> AppResult<()>;
}

/// In-memory registry.
///
/// One coarse `RwLock` over the whole map: every transition runs under the
/// write lock, which serializes mutations per id (and across ids, which is
/// acceptable since all mutations are pointer-sized bookkeeping).
#[derive(Default)]
pub struct InMemoryRegistry {
    entries: RwLock<HashMap<Uuid, FileEntry>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileRegistry for InMemoryRegistry {
    async fn insert(&self, entry: FileEntry) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(&entry.id) {
            return Err(AppError::Internal(format!(
                "File id {} already registered",
                entry.id
            )));
        }
        entries.insert(entry.id, entry);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> AppResult<FileEntry> {
        self.entries
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))
    }

    async fn list(&self) -> Vec<FileEntry> {
        let mut files: Vec<FileEntry> = self.entries.read().await.values().cloned().collect();
        files.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        files
    }

    async fn remove(&self, id: Uuid) -> AppResult<FileEntry> {
        self.entries
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))
    }

    async fn begin_conversion(&self, id: Uuid) -> AppResult<FileEntry> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

        if entry.status != FileStatus::Uploaded {
            return Err(AppError::InvalidState(
                "File is not ready for conversion".to_string(),
            ));
        }

        entry.status = FileStatus::Converting;
        Ok(entry.clone())
    }

    async fn complete_conversion(&self, id: Uuid, converted_name: String) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        match entries.get_mut(&id) {
            Some(entry) if entry.status == FileStatus::Converting => {
                entry.status = FileStatus::Completed;
                entry.converted_name = Some(converted_name);
                Ok(())
            }
            Some(entry) => {
                tracing::warn!(
                    file_id = %id,
                    status = %entry.status,
                    "Ignoring completion for entry not in converting state"
                );
                Ok(())
            }
            None => {
                tracing::debug!(file_id = %id, "Entry deleted before conversion completed");
                Ok(())
            }
        }
    }

    async fn fail_conversion(&self, id: Uuid, message: String) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        match entries.get_mut(&id) {
            Some(entry) if entry.status == FileStatus::Converting => {
                entry.status = FileStatus::Failed;
                entry.error_message = Some(message);
                Ok(())
            }
            Some(entry) => {
                tracing::warn!(
                    file_id = %id,
                    status = %entry.status,
                    "Ignoring failure for entry not in converting state"
                );
                Ok(())
            }
            None => {
                tracing::debug!(file_id = %id, "Entry deleted before conversion failed");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: Uuid) -> FileEntry {
        FileEntry::new(id, format!("{id}.vsdx"), "diagram.vsdx".to_string(), 128)
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let registry = InMemoryRegistry::new();
        let id = Uuid::new_v4();
        registry.insert(entry(id)).await.unwrap();

        let fetched = registry.get(id).await.unwrap();
        assert_eq!(fetched.id, id);
        assert_eq!(fetched.status, FileStatus::Uploaded);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let registry = InMemoryRegistry::new();
        let err = registry.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected() {
        let registry = InMemoryRegistry::new();
        let id = Uuid::new_v4();
        registry.insert(entry(id)).await.unwrap();
        assert!(registry.insert(entry(id)).await.is_err());
    }

    #[tokio::test]
    async fn test_begin_conversion_is_single_shot() {
        let registry = InMemoryRegistry::new();
        let id = Uuid::new_v4();
        registry.insert(entry(id)).await.unwrap();

        let updated = registry.begin_conversion(id).await.unwrap();
        assert_eq!(updated.status, FileStatus::Converting);

        // A second attempt must observe the transition, not re-accept.
        let err = registry.begin_conversion(id).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_complete_sets_artifact_name() {
        let registry = InMemoryRegistry::new();
        let id = Uuid::new_v4();
        registry.insert(entry(id)).await.unwrap();
        registry.begin_conversion(id).await.unwrap();
        registry
            .complete_conversion(id, format!("{id}.xml"))
            .await
            .unwrap();

        let fetched = registry.get(id).await.unwrap();
        assert_eq!(fetched.status, FileStatus::Completed);
        assert_eq!(fetched.converted_name, Some(format!("{id}.xml")));
        assert!(fetched.error_message.is_none());
    }

    #[tokio::test]
    async fn test_fail_sets_message() {
        let registry = InMemoryRegistry::new();
        let id = Uuid::new_v4();
        registry.insert(entry(id)).await.unwrap();
        registry.begin_conversion(id).await.unwrap();
        registry
            .fail_conversion(id, "Failed to parse Visio file: bad archive".to_string())
            .await
            .unwrap();

        let fetched = registry.get(id).await.unwrap();
        assert_eq!(fetched.status, FileStatus::Failed);
        assert!(fetched.error_message.is_some());
        assert!(fetched.converted_name.is_none());
    }

    #[tokio::test]
    async fn test_terminal_states_are_sticky() {
        let registry = InMemoryRegistry::new();
        let id = Uuid::new_v4();
        registry.insert(entry(id)).await.unwrap();
        registry.begin_conversion(id).await.unwrap();
        registry
            .fail_conversion(id, "boom".to_string())
            .await
            .unwrap();

        // A late completion must not resurrect a failed entry.
        registry
            .complete_conversion(id, format!("{id}.xml"))
            .await
            .unwrap();
        let fetched = registry.get(id).await.unwrap();
        assert_eq!(fetched.status, FileStatus::Failed);
        assert!(fetched.converted_name.is_none());
    }

    #[tokio::test]
    async fn test_updates_after_delete_are_noops() {
        let registry = InMemoryRegistry::new();
        let id = Uuid::new_v4();
        registry.insert(entry(id)).await.unwrap();
        registry.begin_conversion(id).await.unwrap();
        registry.remove(id).await.unwrap();

        registry
            .complete_conversion(id, format!("{id}.xml"))
            .await
            .unwrap();
        assert!(registry.get(id).await.is_err());
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let registry = InMemoryRegistry::new();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        registry.insert(entry(first)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        registry.insert(entry(second)).await.unwrap();

        let files = registry.list().await;
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].id, second);
        assert_eq!(files[1].id, first);
    }
}
