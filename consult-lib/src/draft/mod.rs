use async_trait::async_trait;
use consult_proto::dto::DraftSubmission;
use thiserror::Error;

mod file_store;
mod memory_store;

pub use file_store::*;
pub use memory_store::*;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("No form data found. Please fill out the form first.")]
    NotFound,
    #[error("Invalid form data. Please try again.")]
    Corrupt(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Io failures may succeed on retry; missing or corrupt drafts never will.
    pub fn is_transient(&self) -> bool {
        matches!(self, StorageError::Io(_))
    }
}

/// Single-slot persistence for the draft handed from the form step to the
/// payment step. The last `save` wins.
#[async_trait]
pub trait DraftStore: Send + Sync {
    async fn save(&self, draft: &DraftSubmission) -> Result<(), StorageError>;

    async fn load(&self) -> Result<DraftSubmission, StorageError>;

    /// Clearing an empty slot is not an error.
    async fn clear(&self) -> Result<(), StorageError>;
}

fn parse(raw: &str) -> Result<DraftSubmission, StorageError> {
    serde_json::from_str(raw).map_err(|e| {
        log::error!("Error parsing form data: {}", e);
        StorageError::Corrupt(Box::new(e))
    })
}

fn serialize(draft: &DraftSubmission) -> Result<String, StorageError> {
    serde_json::to_string(draft).map_err(|e| StorageError::Corrupt(Box::new(e)))
}

#[cfg(test)]
pub(crate) fn sample_draft() -> DraftSubmission {
    use consult_proto::dto::PortableBinary;

    DraftSubmission {
        name: "Jo".to_owned(),
        email: "a@b.com".to_owned(),
        phone: Some("+91 98765 43210".to_owned()),
        dob: "1990-01-01".to_owned(),
        tob: Some("06:30".to_owned()),
        pob: "Pune".to_owned(),
        service: "career".to_owned(),
        message: "Hello".to_owned(),
        left_image: PortableBinary("data:image/png;base64,AAEC".to_owned()),
        right_image: PortableBinary("data:image/png;base64,AwQF".to_owned()),
    }
}
