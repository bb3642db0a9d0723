use base64::{engine::general_purpose::STANDARD, Engine as _};
use consult_proto::dto::PortableBinary;
use thiserror::Error;

use super::MediaFile;

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Not a base64 data URL")]
    NotDataUrl,
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),
}

pub fn encode(file: &MediaFile) -> PortableBinary {
    PortableBinary(format!(
        "{}{}{}{}",
        DATA_PREFIX,
        file.mime,
        BASE64_MARKER,
        STANDARD.encode(&file.bytes)
    ))
}

/// Inverse of [`encode`]. Data URLs carry no file name, so the caller picks a
/// stem and the extension is derived from the MIME type.
pub fn decode(binary: &PortableBinary, stem: &str) -> Result<MediaFile, DecodeError> {
    let (header, payload) = binary
        .as_str()
        .split_once(BASE64_MARKER)
        .ok_or(DecodeError::NotDataUrl)?;
    let mime = header
        .strip_prefix(DATA_PREFIX)
        .filter(|mime| !mime.is_empty())
        .ok_or(DecodeError::NotDataUrl)?;
    let bytes = STANDARD.decode(payload)?;

    let name = match mime_guess::get_mime_extensions_str(mime).and_then(|exts| exts.first()) {
        Some(ext) => format!("{}.{}", stem, ext),
        None => stem.to_string(),
    };
    Ok(MediaFile::new(name, mime, bytes))
}

#[cfg(test)]
mod tests {
    use consult_proto::dto::PortableBinary;

    use super::{decode, encode, DecodeError};
    use crate::media::MediaFile;

    #[test]
    fn test_decode_restores_bytes() {
        let bytes: Vec<u8> = (0..=255).cycle().take(4099).collect();
        let file = MediaFile::new("palm.png", "image/png", bytes.clone());

        let binary = encode(&file);
        assert!(binary.as_str().starts_with("data:image/png;base64,"));

        let decoded = decode(&binary, "left-palm").unwrap();
        assert_eq!(bytes, decoded.bytes);
        assert_eq!("image/png", decoded.mime);
        assert_eq!("left-palm.png", decoded.name);
    }

    #[test]
    fn test_decode_empty_file() {
        let file = MediaFile::new("empty.jpg", "image/jpeg", vec![]);
        let decoded = decode(&encode(&file), "right-palm").unwrap();
        assert!(decoded.bytes.is_empty());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode(&PortableBinary("hello".to_owned()), "x").unwrap_err();
        assert!(matches!(err, DecodeError::NotDataUrl));

        let err = decode(&PortableBinary(";base64,AAAA".to_owned()), "x").unwrap_err();
        assert!(matches!(err, DecodeError::NotDataUrl));

        let err = decode(&PortableBinary("data:image/png;base64,@@@".to_owned()), "x").unwrap_err();
        assert!(matches!(err, DecodeError::Base64(_)));
    }
}
