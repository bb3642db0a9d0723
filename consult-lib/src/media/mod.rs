use async_trait::async_trait;

mod encoding;
mod file;
mod uploader;

pub use encoding::*;
pub use file::*;
pub use uploader::*;

#[async_trait]
pub trait MediaUploader: Send + Sync {
    /// Sends one file to the media endpoint and returns its public URL.
    async fn upload(&self, file: &MediaFile) -> Result<String, UploadError>;
}
