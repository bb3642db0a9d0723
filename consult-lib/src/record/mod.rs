use async_trait::async_trait;
use consult_proto::dto::{FinalRecord, InsertResponse};
use thiserror::Error;

mod rest;

pub use rest::*;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct RemoteInsertError {
    pub message: String,
    pub details: Option<String>,
    pub code: Option<String>,
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Inserts the rows in a single call. Transport failures are folded into
    /// the response's `error` just like rejections by the backend.
    async fn insert(&self, records: &[FinalRecord]) -> InsertResponse;
}

/// Turns an insert response into a result; a present `error` always wins.
pub fn check(response: InsertResponse) -> Result<Vec<FinalRecord>, RemoteInsertError> {
    match response.error {
        Some(error) => Err(RemoteInsertError {
            message: error.message,
            details: error.details,
            code: error.code,
        }),
        None => Ok(response.data.unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use consult_proto::dto::{InsertResponse, StoreErrorDto};

    use super::check;

    #[test]
    fn test_check_error_wins() {
        let response = InsertResponse {
            data: Some(vec![]),
            error: Some(StoreErrorDto {
                message: "duplicate key".to_owned(),
                ..Default::default()
            }),
        };
        assert_eq!("duplicate key", check(response).unwrap_err().to_string());
        assert!(check(InsertResponse::ok(None)).unwrap().is_empty());
    }
}
