use serde::{Deserialize, Serialize};

use super::FinalRecord;

/// Error body returned by the record store when it rejects an insert.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct StoreErrorDto {
    #[serde(default)]
    pub message: String,
    pub details: Option<String>,
    pub hint: Option<String>,
    pub code: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InsertResponse {
    pub data: Option<Vec<FinalRecord>>,
    pub error: Option<StoreErrorDto>,
}

impl InsertResponse {
    pub fn ok(data: Option<Vec<FinalRecord>>) -> Self {
        Self { data, error: None }
    }

    pub fn failed(error: StoreErrorDto) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StoreErrorDto;

    #[test]
    pub fn test_partial_error_body() {
        let dto: StoreErrorDto =
            serde_json::from_str(r#"{"message":"permission denied","code":"42501"}"#).unwrap();
        assert_eq!("permission denied", dto.message);
        assert_eq!(Some("42501".to_owned()), dto.code);
        assert_eq!(None, dto.details);
    }
}
