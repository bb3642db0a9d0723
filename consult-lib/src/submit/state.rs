#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Staged,
    Redirected,
    Uploading,
    Persisting,
    Done,
    Error(String),
}

/// The submit button: disabled while a pipeline runs, restored to its
/// original label when the pipeline fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: String,
    pub enabled: bool,
    original_label: String,
}

impl SubmitControl {
    pub fn new(label: impl ToString) -> Self {
        let label = label.to_string();
        Self {
            original_label: label.clone(),
            label,
            enabled: true,
        }
    }

    pub fn busy(&mut self, label: impl ToString) {
        self.enabled = false;
        self.label = label.to_string();
    }

    pub fn restore(&mut self) {
        self.enabled = true;
        self.label = self.original_label.clone();
    }

    /// Disables the control without changing its label.
    pub fn block(&mut self) {
        self.enabled = false;
    }

    pub fn original_label(&self) -> &str {
        &self.original_label
    }
}

pub(crate) fn transition(state: &mut SubmissionState, next: SubmissionState) {
    log::debug!("submission {:?} -> {:?}", state, next);
    *state = next;
}
