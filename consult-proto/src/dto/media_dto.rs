use std::str::FromStr;

use mime_guess::Mime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    Pdf,
    Text,
    Other,
}

impl Default for MediaType {
    fn default() -> Self {
        MediaType::Other
    }
}

impl From<&Mime> for MediaType {
    fn from(mime: &Mime) -> Self {
        use mime_guess::mime::*;

        match (mime.type_(), mime.subtype()) {
            (IMAGE, _) => MediaType::Image,
            (VIDEO, _) => MediaType::Video,
            (APPLICATION, PDF) => MediaType::Pdf,
            (TEXT, _) => MediaType::Text,
            _ => MediaType::Other,
        }
    }
}

impl MediaType {
    pub fn from_mime_str(mime: &str) -> Self {
        Mime::from_str(mime)
            .map(|mime| Self::from(&mime))
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MediaUploadResponseDto {
    pub secure_url: Option<String>,
    pub public_id: Option<String>,
    pub bytes: Option<u64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MediaErrorDto {
    pub error: MediaErrorMessage,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MediaErrorMessage {
    pub message: String,
}
