use std::{sync::Arc, time::Duration};

use consult_proto::dto::{DraftSubmission, FinalRecord};
use futures_util::future::try_join;
use tokio::sync::mpsc::Sender;

use crate::{
    draft::{DraftStore, FileDraftStore, StorageError},
    media::{
        decode, CloudinaryUploader, DecodeError, MediaFile, MediaUploader, UploadProgress,
    },
    record::{self, RecordStore, RestRecordStore},
    Error, Result, Settings,
};

use super::{transition, FormView, Page, SubmissionState, SubmitControl, SubmitError};

pub const PAY_LABEL: &str = "Pay Now";
pub const PROCESSING_PAYMENT: &str = "Processing Payment...";
pub const UPLOADING_IMAGES: &str = "Uploading Images...";
pub const SAVING_DETAILS: &str = "Saving Details...";
pub const NO_FORM_DATA: &str = "No form data available. Please go back and fill the form.";

/// Everything the payment step talks to, passed in rather than looked up.
#[derive(Clone)]
pub struct PaymentServices {
    pub store: Arc<dyn DraftStore>,
    pub uploader: Arc<dyn MediaUploader>,
    pub records: Arc<dyn RecordStore>,
    pub payment_delay: Duration,
}

impl PaymentServices {
    /// Wires the file-backed draft slot and the HTTP clients described by
    /// `settings`.
    pub fn from_settings(
        settings: &Settings,
        progress_tx: Option<Sender<UploadProgress>>,
    ) -> Result<Self> {
        let client = reqwest::ClientBuilder::new().build()?;
        let mut uploader = CloudinaryUploader::new(client.clone(), settings);
        if let Some(progress_tx) = progress_tx {
            uploader = uploader.with_progress(progress_tx);
        }
        Ok(Self {
            store: Arc::new(FileDraftStore::new(&settings.draft_dir)),
            uploader: Arc::new(uploader),
            records: Arc::new(RestRecordStore::new(client, settings)),
            payment_delay: settings.payment_delay,
        })
    }
}

struct StagedDraft {
    draft: DraftSubmission,
    left: MediaFile,
    right: MediaFile,
}

/// Second page. Rebuilt from the draft slot on arrival; nothing is carried
/// over in memory from the form step.
pub struct PaymentStep {
    services: PaymentServices,
    staged: Option<StagedDraft>,
    state: SubmissionState,
    control: SubmitControl,
}

impl PaymentStep {
    pub async fn open(services: PaymentServices, view: &mut dyn FormView) -> Self {
        let mut step = Self {
            services,
            staged: None,
            state: SubmissionState::Redirected,
            control: SubmitControl::new(PAY_LABEL),
        };

        match step.load().await {
            Ok(staged) => {
                view.show_summary(&staged.draft);
                step.staged = Some(staged);
            }
            Err(e) => {
                log::error!("Failed to load form data: {}", e);
                transition(&mut step.state, SubmissionState::Error(e.to_string()));
                step.control.block();
                view.update_submit(&step.control);
                view.show_error(&e.to_string());
            }
        }
        step
    }

    async fn load(&self) -> std::result::Result<StagedDraft, StorageError> {
        let draft = self.services.store.load().await?;
        let corrupt = |e: DecodeError| StorageError::Corrupt(Box::new(e));
        let left = decode(&draft.left_image, "left-palm").map_err(corrupt)?;
        let right = decode(&draft.right_image, "right-palm").map_err(corrupt)?;
        Ok(StagedDraft { draft, left, right })
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn control(&self) -> &SubmitControl {
        &self.control
    }

    pub fn draft(&self) -> Option<&DraftSubmission> {
        self.staged.as_ref().map(|staged| &staged.draft)
    }

    /// Uploads both images, stores the record and clears the draft. On failure
    /// the draft is kept and the control re-enabled so the step can be retried.
    pub async fn finalize(&mut self, view: &mut dyn FormView) -> Result<Page> {
        if self.staged.is_none() {
            self.reload(view).await?;
        }
        if !self.control.enabled {
            return Err(SubmitError::Busy.into());
        }

        match self.run(view).await {
            Ok(page) => Ok(page),
            Err(e) => {
                self.fail(&e, view);
                Err(e)
            }
        }
    }

    /// Reads the slot again after a failed load so an Io error can clear up.
    /// A finished step has nothing left to submit.
    async fn reload(&mut self, view: &mut dyn FormView) -> std::result::Result<(), StorageError> {
        if self.state == SubmissionState::Done {
            view.show_error(NO_FORM_DATA);
            return Err(StorageError::NotFound);
        }
        match self.load().await {
            Ok(staged) => {
                view.show_summary(&staged.draft);
                self.staged = Some(staged);
                self.control.restore();
                view.update_submit(&self.control);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load form data: {}", e);
                view.show_error(&e.to_string());
                Err(e)
            }
        }
    }

    async fn run(&mut self, view: &mut dyn FormView) -> Result<Page> {
        let staged = self.staged.as_ref().ok_or(StorageError::NotFound)?;

        if !self.services.payment_delay.is_zero() {
            self.control.busy(PROCESSING_PAYMENT);
            view.update_submit(&self.control);
            tokio::time::sleep(self.services.payment_delay).await;
        }

        transition(&mut self.state, SubmissionState::Uploading);
        self.control.busy(UPLOADING_IMAGES);
        view.update_submit(&self.control);
        let uploader = &self.services.uploader;
        let (left_url, right_url) =
            try_join(uploader.upload(&staged.left), uploader.upload(&staged.right)).await?;

        transition(&mut self.state, SubmissionState::Persisting);
        self.control.busy(SAVING_DETAILS);
        view.update_submit(&self.control);
        let record = FinalRecord::from_draft(&staged.draft, left_url, right_url);
        record::check(
            self.services
                .records
                .insert(std::slice::from_ref(&record))
                .await,
        )?;
        log::info!("stored submission for {}", record.email);

        // the record is stored; a stale draft must not turn into a failure here
        if let Err(e) = self.services.store.clear().await {
            log::warn!("Failed to clear form data: {}", e);
        }
        self.staged = None;
        transition(&mut self.state, SubmissionState::Done);
        Ok(Page::Landing {
            payment_success: true,
        })
    }

    fn fail(&mut self, error: &Error, view: &mut dyn FormView) {
        log::error!("Error finalising submission: {}", error);
        let message = format!("Submission failed. Please try again. Error: {}", error);
        transition(&mut self.state, SubmissionState::Error(message.clone()));
        self.control.restore();
        view.update_submit(&self.control);
        view.show_error(&message);
    }
}
