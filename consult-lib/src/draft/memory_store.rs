use std::sync::Mutex;

use async_trait::async_trait;
use consult_proto::dto::DraftSubmission;

use super::{parse, serialize, DraftStore, StorageError};

/// Holds the serialized draft in memory; useful when nothing has to outlive
/// the process.
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    slot: Mutex<Option<String>>,
}

impl MemoryDraftStore {
    /// Replaces the slot with raw text, bypassing serialization.
    pub fn put_raw(&self, raw: impl ToString) {
        *self.lock() = Some(raw.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_none()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn save(&self, draft: &DraftSubmission) -> Result<(), StorageError> {
        let raw = serialize(draft)?;
        *self.lock() = Some(raw);
        Ok(())
    }

    async fn load(&self) -> Result<DraftSubmission, StorageError> {
        let raw = self.lock().clone().ok_or(StorageError::NotFound)?;
        parse(&raw)
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.lock().take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryDraftStore;
    use crate::draft::{sample_draft, DraftStore, StorageError};

    #[tokio::test]
    async fn test_slot_lifecycle() {
        let store = MemoryDraftStore::default();
        assert!(matches!(store.load().await, Err(StorageError::NotFound)));

        store.save(&sample_draft()).await.unwrap();
        assert_eq!(sample_draft(), store.load().await.unwrap());

        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_slot() {
        let store = MemoryDraftStore::default();
        store.put_raw(r#"{"name":"Jo"}"#);
        assert!(matches!(store.load().await, Err(StorageError::Corrupt(_))));
    }
}
