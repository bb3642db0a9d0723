use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    Validation(#[from] crate::validate::ValidationError),
    #[error(transparent)]
    Storage(#[from] crate::draft::StorageError),
    #[error(transparent)]
    Upload(#[from] crate::media::UploadError),
    #[error(transparent)]
    RemoteInsert(#[from] crate::record::RemoteInsertError),
    #[error(transparent)]
    Submit(#[from] crate::submit::SubmitError),
}

impl Error {
    /// Missing or corrupt drafts can only be fixed by starting over from the form.
    pub fn requires_restart(&self) -> bool {
        matches!(self, Error::Storage(e) if !e.is_transient())
    }
}
