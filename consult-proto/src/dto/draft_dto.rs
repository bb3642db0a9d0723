use serde::{Deserialize, Serialize};

/// An image kept as a `data:<mime>;base64,<payload>` URL so it survives
/// being written to the draft slot.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PortableBinary(pub String);

impl PortableBinary {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DraftSubmission {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub dob: String,
    pub tob: Option<String>, // none when the time of birth is unknown
    pub pob: String,
    pub service: String,
    #[serde(default)]
    pub message: String,
    pub left_image: PortableBinary,
    pub right_image: PortableBinary,
}

#[cfg(test)]
mod tests {
    use super::{DraftSubmission, PortableBinary};

    #[test]
    pub fn test_serde_json() {
        let draft = DraftSubmission {
            name: "Jo".to_owned(),
            email: "a@b.com".to_owned(),
            phone: None,
            dob: "1990-01-01".to_owned(),
            tob: None,
            pob: "Pune".to_owned(),
            service: "career".to_owned(),
            message: String::new(),
            left_image: PortableBinary("data:image/png;base64,AA==".to_owned()),
            right_image: PortableBinary("data:image/png;base64,AQ==".to_owned()),
        };
        let draft_str = r#"{"name":"Jo","email":"a@b.com","dob":"1990-01-01","tob":null,"pob":"Pune","service":"career","message":"","leftImage":"data:image/png;base64,AA==","rightImage":"data:image/png;base64,AQ=="}"#;
        assert_eq!(draft_str, serde_json::to_string(&draft).unwrap());
        let new_draft: DraftSubmission = serde_json::from_str(draft_str).unwrap();
        assert_eq!(draft, new_draft);
    }
}
