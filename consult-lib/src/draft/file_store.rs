use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use consult_proto::{dto::DraftSubmission, DRAFT_KEY};

use super::{parse, serialize, DraftStore, StorageError};

/// Keeps the draft as `<dir>/pendingFormData.json`.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    path: PathBuf,
}

impl FileDraftStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", DRAFT_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DraftStore for FileDraftStore {
    async fn save(&self, draft: &DraftSubmission) -> Result<(), StorageError> {
        let raw = serialize(draft)?;
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        // write then rename so a crash never leaves half a draft behind
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, raw).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        log::debug!("draft saved to {:?}", self.path);
        Ok(())
    }

    async fn load(&self) -> Result<DraftSubmission, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => parse(&raw),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    async fn clear(&self) -> Result<(), StorageError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                log::debug!("draft removed from {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
