use async_trait::async_trait;
use consult_proto::dto::{FinalRecord, InsertResponse, StoreErrorDto};
use reqwest::{header, Client};

use crate::Settings;

use super::RecordStore;

/// Inserts rows through the hosted table's REST interface.
#[derive(Debug, Clone)]
pub struct RestRecordStore {
    client: Client,
    url: String,
    key: String,
}

impl RestRecordStore {
    pub fn new(client: Client, settings: &Settings) -> Self {
        Self {
            client,
            url: settings.record_insert_url(),
            key: settings.store_key.clone(),
        }
    }
}

#[async_trait]
impl RecordStore for RestRecordStore {
    async fn insert(&self, records: &[FinalRecord]) -> InsertResponse {
        let response = self
            .client
            .post(&self.url)
            .header("apikey", &self.key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.key))
            .header("Prefer", "return=minimal")
            .json(records)
            .send()
            .await;
        let response = match response {
            Ok(response) => response,
            Err(e) => {
                log::error!("Failed to reach record store: {}", e);
                return InsertResponse::failed(StoreErrorDto {
                    message: e.to_string(),
                    ..Default::default()
                });
            }
        };

        let status = response.status();
        if status.is_success() {
            // minimal returns send no body; a representation is kept if present
            let body = response.bytes().await.unwrap_or_default();
            if body.is_empty() {
                return InsertResponse::ok(None);
            }
            let data = match serde_json::from_slice::<Vec<FinalRecord>>(&body) {
                Ok(data) => Some(data),
                Err(e) => {
                    log::warn!("Insert succeeded but response body was unreadable: {}", e);
                    None
                }
            };
            return InsertResponse::ok(data);
        }

        let error = response
            .json::<StoreErrorDto>()
            .await
            .unwrap_or_else(|_| StoreErrorDto {
                message: format!("Unknown response status code: {}", status),
                ..Default::default()
            });
        log::error!("Record store rejected insert ({}): {}", status, error.message);
        InsertResponse::failed(error)
    }
}
