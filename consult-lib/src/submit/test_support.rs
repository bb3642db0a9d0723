use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;
use consult_proto::dto::{DraftSubmission, FinalRecord, InsertResponse, StoreErrorDto};
use reqwest::StatusCode;

use crate::{
    media::{MediaFile, MediaUploader, UploadError},
    record::RecordStore,
    validate::Annotations,
};

use super::{FormView, SubmitControl};

#[derive(Default)]
pub struct RecordingView {
    pub annotations: Vec<Annotations>,
    pub controls: Vec<SubmitControl>,
    pub errors: Vec<String>,
    pub summaries: Vec<DraftSubmission>,
}

impl FormView for RecordingView {
    fn render_annotations(&mut self, annotations: &Annotations) {
        self.annotations.push(annotations.clone());
    }

    fn update_submit(&mut self, control: &SubmitControl) {
        self.controls.push(control.clone());
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn show_summary(&mut self, draft: &DraftSubmission) {
        self.summaries.push(draft.clone());
    }
}

#[derive(Default)]
pub struct FakeUploader {
    fail_on: Option<String>,
    calls: AtomicUsize,
}

impl FakeUploader {
    pub fn failing(file_name: &str) -> Self {
        Self {
            fail_on: Some(file_name.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaUploader for FakeUploader {
    async fn upload(&self, file: &MediaFile) -> Result<String, UploadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.as_deref() == Some(file.name.as_str()) {
            return Err(UploadError::Status {
                status: StatusCode::BAD_GATEWAY,
                message: "connection reset".to_string(),
            });
        }
        Ok(format!("https://media.example/{}", file.name))
    }
}

#[derive(Default)]
pub struct FakeRecords {
    reject_with: Mutex<Option<String>>,
    inserted: Mutex<Vec<FinalRecord>>,
}

impl FakeRecords {
    pub fn rejecting(message: &str) -> Self {
        Self {
            reject_with: Mutex::new(Some(message.to_string())),
            inserted: Mutex::default(),
        }
    }

    pub fn accept(&self) {
        self.reject_with.lock().unwrap().take();
    }

    pub fn inserted(&self) -> Vec<FinalRecord> {
        self.inserted.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordStore for FakeRecords {
    async fn insert(&self, records: &[FinalRecord]) -> InsertResponse {
        if let Some(message) = self.reject_with.lock().unwrap().clone() {
            return InsertResponse::failed(StoreErrorDto {
                message,
                ..Default::default()
            });
        }
        self.inserted.lock().unwrap().extend_from_slice(records);
        InsertResponse::ok(Some(records.to_vec()))
    }
}
