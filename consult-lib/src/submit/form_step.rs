use std::sync::Arc;

use consult_proto::dto::DraftSubmission;

use crate::{
    draft::DraftStore,
    media::encode,
    validate::{validate_form, Annotations, ConsultationForm, Field, ValidationError},
    Result,
};

use super::{transition, FormView, Page, SubmissionState, SubmitControl, SubmitError};

pub const FORM_SUBMIT_LABEL: &str = "Proceed to Payment";
pub const PROCESSING: &str = "Processing...";
pub const STAGE_FAILED: &str = "Something went wrong. Please try again.";

/// First page: validate, stage the draft, hand over to the payment page.
pub struct FormStep {
    store: Arc<dyn DraftStore>,
    state: SubmissionState,
    control: SubmitControl,
    annotations: Annotations,
}

impl FormStep {
    pub fn new(store: Arc<dyn DraftStore>) -> Self {
        Self {
            store,
            state: SubmissionState::Idle,
            control: SubmitControl::new(FORM_SUBMIT_LABEL),
            annotations: Annotations::default(),
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn control(&self) -> &SubmitControl {
        &self.control
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    pub async fn submit(
        &mut self,
        form: &mut ConsultationForm,
        view: &mut dyn FormView,
    ) -> Result<Page> {
        if !self.control.enabled {
            return Err(SubmitError::Busy.into());
        }
        transition(&mut self.state, SubmissionState::Validating);

        let validation = validate_form(form, &mut self.annotations);
        view.render_annotations(&self.annotations);
        let draft = match validation.and_then(|_| stage(&*form)) {
            Ok(draft) => draft,
            Err(e) => {
                transition(&mut self.state, SubmissionState::Error(e.to_string()));
                view.show_error(&e.to_string());
                return Err(e.into());
            }
        };

        self.control.busy(PROCESSING);
        view.update_submit(&self.control);

        if let Err(e) = self.store.save(&draft).await {
            log::error!("Error processing form: {}", e);
            transition(&mut self.state, SubmissionState::Error(e.to_string()));
            self.control.restore();
            view.update_submit(&self.control);
            view.show_error(STAGE_FAILED);
            return Err(e.into());
        }
        transition(&mut self.state, SubmissionState::Staged);
        log::info!("draft staged for {}", draft.email);

        transition(&mut self.state, SubmissionState::Redirected);
        Ok(Page::Payment)
    }
}

fn stage(form: &ConsultationForm) -> std::result::Result<DraftSubmission, ValidationError> {
    let (Some(left), Some(right)) = (&form.left_palm.file, &form.right_palm.file) else {
        let mut error = ValidationError::default();
        if form.left_palm.is_empty() {
            error.missing.push(Field::LeftPalm);
        }
        if form.right_palm.is_empty() {
            error.missing.push(Field::RightPalm);
        }
        return Err(error);
    };

    let optional = |value: &str| {
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    };

    Ok(DraftSubmission {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.phone.as_deref().and_then(optional),
        dob: form.dob.trim().to_string(),
        tob: if form.tob_unknown {
            None
        } else {
            optional(&form.tob)
        },
        pob: form.pob.trim().to_string(),
        service: form.service.trim().to_string(),
        message: form.message.trim().to_string(),
        left_image: encode(left),
        right_image: encode(right),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use consult_proto::MAX_IMAGE_BYTES;

    use super::{FormStep, FORM_SUBMIT_LABEL};
    use crate::{
        draft::{DraftStore, MemoryDraftStore},
        media::{decode, MediaFile},
        submit::{test_support::RecordingView, Page, SubmissionState, SubmitError},
        validate::{ConsultationForm, Field, FileInput, MISSING_REQUIRED, NAME_TOO_SHORT},
        Error,
    };

    fn image(size: u64) -> FileInput {
        FileInput::new(MediaFile::new(
            "palm.jpg",
            "image/jpeg",
            vec![9u8; size as usize],
        ))
    }

    fn form() -> ConsultationForm {
        ConsultationForm {
            name: " Jo ".to_owned(),
            email: "a@b.com".to_owned(),
            dob: "1990-01-01".to_owned(),
            tob: "06:30".to_owned(),
            pob: "Pune".to_owned(),
            service: "career".to_owned(),
            message: " ".to_owned(),
            left_palm: image(1024 * 1024),
            right_palm: image(1024 * 1024),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_valid_form_is_staged() {
        let store = Arc::new(MemoryDraftStore::default());
        let mut step = FormStep::new(store.clone());
        let mut view = RecordingView::default();
        let mut form = form();

        let page = step.submit(&mut form, &mut view).await.unwrap();
        assert_eq!(Page::Payment, page);
        assert_eq!(&SubmissionState::Redirected, step.state());
        assert!(!step.control().enabled);

        let draft = store.load().await.unwrap();
        assert_eq!("Jo", draft.name);
        assert_eq!(Some("06:30".to_owned()), draft.tob);
        assert!(draft.message.is_empty());
        let left = decode(&draft.left_image, "left-palm").unwrap();
        assert_eq!(form.left_palm.file.unwrap().bytes, left.bytes);
    }

    #[tokio::test]
    async fn test_unknown_time_stages_without_tob() {
        let store = Arc::new(MemoryDraftStore::default());
        let mut step = FormStep::new(store.clone());
        let mut form = form();
        form.set_time_unknown(true);

        step.submit(&mut form, &mut RecordingView::default())
            .await
            .unwrap();
        assert_eq!(None, store.load().await.unwrap().tob);
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_staged() {
        let store = Arc::new(MemoryDraftStore::default());
        let mut step = FormStep::new(store.clone());
        let mut view = RecordingView::default();
        let mut form = form();
        form.name = "J".to_owned();

        let err = step.submit(&mut form, &mut view).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(store.is_empty());
        assert!(step.control().enabled);
        assert_eq!(FORM_SUBMIT_LABEL, step.control().label);
        assert_eq!(Some(NAME_TOO_SHORT), step.annotations().get(Field::Name));
        assert_eq!(vec![NAME_TOO_SHORT.to_owned()], view.errors);
        assert!(matches!(step.state(), SubmissionState::Error(_)));
    }

    #[tokio::test]
    async fn test_oversized_image_blocks_staging() {
        let store = Arc::new(MemoryDraftStore::default());
        let mut step = FormStep::new(store.clone());
        let mut form = form();
        form.left_palm = image(MAX_IMAGE_BYTES + 1);

        let err = step
            .submit(&mut form, &mut RecordingView::default())
            .await
            .unwrap_err();
        match err {
            Error::Validation(e) => assert_eq!(vec![Field::LeftPalm], e.missing),
            e => panic!("unexpected error: {e}"),
        }
        assert!(form.left_palm.is_empty());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_missing_fields_message() {
        let store = Arc::new(MemoryDraftStore::default());
        let mut step = FormStep::new(store.clone());
        let mut view = RecordingView::default();
        let mut form = form();
        form.pob.clear();

        step.submit(&mut form, &mut view).await.unwrap_err();
        assert_eq!(vec![MISSING_REQUIRED.to_owned()], view.errors);
    }

    #[tokio::test]
    async fn test_second_submit_is_busy() {
        let store = Arc::new(MemoryDraftStore::default());
        let mut step = FormStep::new(store);
        let mut view = RecordingView::default();
        let mut form = form();

        step.submit(&mut form, &mut view).await.unwrap();
        let err = step.submit(&mut form, &mut view).await.unwrap_err();
        assert!(matches!(err, Error::Submit(SubmitError::Busy)));
    }
}
