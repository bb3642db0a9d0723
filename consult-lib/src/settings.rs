use std::{path::PathBuf, time::Duration};

use consult_proto::{
    ApiRoute, DEFAULT_CLOUD_NAME, DEFAULT_MEDIA_BASE, DEFAULT_PAYMENT_DELAY_MS, DEFAULT_TABLE,
    DEFAULT_UPLOAD_PRESET,
};

#[derive(Debug, Clone)]
pub struct Settings {
    pub media_base: String,
    pub cloud_name: String,
    pub upload_preset: String,
    pub store_url: String,
    pub store_key: String,
    pub table: String,
    pub draft_dir: PathBuf,
    pub payment_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            media_base: DEFAULT_MEDIA_BASE.to_string(),
            cloud_name: DEFAULT_CLOUD_NAME.to_string(),
            upload_preset: DEFAULT_UPLOAD_PRESET.to_string(),
            store_url: String::new(),
            store_key: String::new(),
            table: DEFAULT_TABLE.to_string(),
            draft_dir: PathBuf::from("."),
            payment_delay: Duration::from_millis(DEFAULT_PAYMENT_DELAY_MS),
        }
    }
}

impl Settings {
    pub fn media_upload_url(&self) -> String {
        ApiRoute::MediaUpload.target_raw(&self.media_base, &self.cloud_name)
    }

    pub fn record_insert_url(&self) -> String {
        ApiRoute::RecordInsert.target_raw(&self.store_url, &self.table)
    }
}
