use serde::{Deserialize, Serialize};

use super::DraftSubmission;

/// Row written to the hosted table once both images have public URLs.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FinalRecord {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub dob: String,
    pub tob: Option<String>,
    pub pob: String,
    pub service: String,
    pub message: String,
    pub palm_left_url: String,
    pub palm_right_url: String,
}

impl FinalRecord {
    pub fn from_draft(draft: &DraftSubmission, left_url: String, right_url: String) -> Self {
        Self {
            name: draft.name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            dob: draft.dob.clone(),
            tob: draft.tob.clone(),
            pob: draft.pob.clone(),
            service: draft.service.clone(),
            message: draft.message.clone(),
            palm_left_url: left_url,
            palm_right_url: right_url,
        }
    }
}
