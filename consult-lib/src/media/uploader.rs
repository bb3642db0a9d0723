use std::cmp::min;

use async_trait::async_trait;
use consult_proto::dto::{MediaErrorDto, MediaUploadResponseDto};
use reqwest::{
    multipart::{Form, Part},
    Body, Client, StatusCode,
};
use thiserror::Error;
use tokio::sync::mpsc::Sender;

use crate::Settings;

use super::{MediaFile, MediaUploader};

const CHUNK_SIZE: usize = 64 * 1024;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Upload failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Upload failed with status {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("Upload response did not contain a public URL")]
    MissingUrl,
}

#[derive(Debug)]
pub struct UploadProgress {
    pub file_id: String,
    pub file_name: String,
    pub position: u64,
    pub total: u64,
    pub finish: bool,
}

#[derive(Debug, Clone)]
pub struct CloudinaryUploader {
    client: Client,
    url: String,
    upload_preset: String,
    progress_tx: Option<Sender<UploadProgress>>,
}

impl CloudinaryUploader {
    pub fn new(client: Client, settings: &Settings) -> Self {
        Self {
            client,
            url: settings.media_upload_url(),
            upload_preset: settings.upload_preset.clone(),
            progress_tx: None,
        }
    }

    pub fn with_progress(mut self, progress_tx: Sender<UploadProgress>) -> Self {
        self.progress_tx = Some(progress_tx);
        self
    }

    fn body(&self, file: &MediaFile) -> Body {
        let file_id = file.id.clone();
        let file_name = file.name.clone();
        let file_size = file.size();
        let bytes = file.bytes.clone();
        let progress_tx = self.progress_tx.clone();

        let async_stream = async_stream::stream! {
            let mut uploaded = 0;
            for chunk in bytes.chunks(CHUNK_SIZE) {
                let pos = min(uploaded + (chunk.len() as u64), file_size);
                uploaded = pos;
                if let Some(progress_tx) = &progress_tx {
                    let progress = UploadProgress {
                        file_id: file_id.clone(),
                        file_name: file_name.clone(),
                        position: pos,
                        total: file_size,
                        finish: pos >= file_size,
                    };
                    progress_tx.send(progress).await.ok();
                }
                yield Ok::<Vec<u8>, std::io::Error>(chunk.to_vec());
            }
        };
        Body::wrap_stream(async_stream)
    }
}

#[async_trait]
impl MediaUploader for CloudinaryUploader {
    async fn upload(&self, file: &MediaFile) -> Result<String, UploadError> {
        let part = Part::stream_with_length(self.body(file), file.size())
            .file_name(file.name.clone())
            .mime_str(&file.mime)?;
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        let response = self.client.post(&self.url).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<MediaErrorDto>().await {
                Ok(dto) => dto.error.message,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("Upload failed")
                    .to_string(),
            };
            log::error!("Failed to upload {}: {} {}", file.name, status, message);
            return Err(UploadError::Status { status, message });
        }

        let dto = response.json::<MediaUploadResponseDto>().await?;
        let url = dto.secure_url.ok_or(UploadError::MissingUrl)?;
        log::info!("uploaded {} to {}", file.name, url);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use wiremock::{
        matchers::{body_string_contains, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::{CloudinaryUploader, UploadError};
    use crate::{
        media::{MediaFile, MediaUploader},
        Settings,
    };

    fn uploader(server: &MockServer) -> CloudinaryUploader {
        let settings = Settings {
            media_base: server.uri(),
            cloud_name: "demo".to_string(),
            upload_preset: "preset-x".to_string(),
            ..Default::default()
        };
        CloudinaryUploader::new(Client::new(), &settings)
    }

    fn image() -> MediaFile {
        MediaFile::new("left.png", "image/png", vec![7u8; 200 * 1024])
    }

    #[tokio::test]
    async fn test_upload_returns_secure_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1_1/demo/image/upload"))
            .and(body_string_contains("preset-x"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "public_id": "abc",
                "secure_url": "https://res.example/abc.png"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let url = uploader(&server).upload(&image()).await.unwrap();
        assert_eq!("https://res.example/abc.png", url);
    }

    #[tokio::test]
    async fn test_upload_reports_progress() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "secure_url": "https://res.example/abc.png"
            })))
            .mount(&server)
            .await;

        let (progress_tx, mut progress_rx) = tokio::sync::mpsc::channel(100);
        let file = image();
        uploader(&server)
            .with_progress(progress_tx)
            .upload(&file)
            .await
            .unwrap();

        let mut last = None;
        while let Ok(progress) = progress_rx.try_recv() {
            assert_eq!(file.id, progress.file_id);
            assert_eq!(file.size(), progress.total);
            last = Some(progress);
        }
        let last = last.unwrap();
        assert!(last.finish);
        assert_eq!(file.size(), last.position);
    }

    #[tokio::test]
    async fn test_upload_rejected_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "message": "Upload preset not found" }
            })))
            .mount(&server)
            .await;

        let err = uploader(&server).upload(&image()).await.unwrap_err();
        match err {
            UploadError::Status { status, message } => {
                assert_eq!(StatusCode::BAD_REQUEST, status);
                assert_eq!("Upload preset not found", message);
            }
            e => panic!("unexpected error: {e}"),
        }
    }

    #[tokio::test]
    async fn test_upload_without_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let err = uploader(&server).upload(&image()).await.unwrap_err();
        assert!(matches!(err, UploadError::MissingUrl));
    }
}
