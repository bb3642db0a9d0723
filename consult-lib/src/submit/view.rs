use consult_proto::dto::DraftSubmission;

use crate::validate::Annotations;

use super::SubmitControl;

/// Presentation seam for both steps. Implementations only render; all
/// decisions are made by the steps.
pub trait FormView {
    fn render_annotations(&mut self, annotations: &Annotations);

    fn update_submit(&mut self, control: &SubmitControl);

    fn show_error(&mut self, message: &str);

    fn show_summary(&mut self, draft: &DraftSubmission);
}
