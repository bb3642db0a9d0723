use std::path::Path;

use consult_proto::dto::MediaType;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct MediaFile {
    pub id: String,
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(name: impl ToString, mime: impl ToString, bytes: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            mime: mime.to_string(),
            bytes,
        }
    }

    /// Reads a file from disk, guessing its MIME type from the extension.
    pub async fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        log::debug!("opened {} ({}, {} bytes)", name, mime, bytes.len());
        Ok(Self::new(name, mime, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn media_type(&self) -> MediaType {
        MediaType::from_mime_str(&self.mime)
    }
}
