//! Base64 data URI value object for product photos.
//!
//! The wizard carries image bytes inline as `data:<mime>;base64,<payload>`
//! strings so no separate file storage is needed. Only the image formats the
//! uploader accepts are considered valid.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Image MIME types accepted by the wizard's file input.
pub const ACCEPTED_IMAGE_MIMES: &[&str] = &["image/png", "image/jpeg", "image/webp"];

/// A validated `data:<mime>;base64,<payload>` string.
///
/// Construction guarantees the scheme, an accepted image MIME type, and a
/// decodable base64 payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DataUri {
    mime: String,
    payload: String,
}

impl DataUri {
    /// Parse and validate a data URI string.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let rest = input
            .strip_prefix("data:")
            .ok_or_else(|| DomainError::parse("data URI must start with 'data:'"))?;

        let (mime, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| DomainError::parse("data URI must be base64 encoded"))?;

        if !ACCEPTED_IMAGE_MIMES.contains(&mime) {
            return Err(DomainError::validation(format!(
                "unsupported image type '{mime}', expected one of: {}",
                ACCEPTED_IMAGE_MIMES.join(", ")
            )));
        }

        if payload.is_empty() {
            return Err(DomainError::parse("data URI payload is empty"));
        }

        BASE64
            .decode(payload)
            .map_err(|e| DomainError::parse(format!("invalid base64 payload: {e}")))?;

        Ok(Self {
            mime: mime.to_string(),
            payload: payload.to_string(),
        })
    }

    /// Encode raw image bytes as a data URI.
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Result<Self, DomainError> {
        if !ACCEPTED_IMAGE_MIMES.contains(&mime) {
            return Err(DomainError::validation(format!(
                "unsupported image type '{mime}'"
            )));
        }
        if bytes.is_empty() {
            return Err(DomainError::validation("image payload is empty"));
        }
        Ok(Self {
            mime: mime.to_string(),
            payload: BASE64.encode(bytes),
        })
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Decode the payload back to raw bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        // Payload was validated at construction.
        BASE64.decode(&self.payload).unwrap_or_default()
    }

    /// The base64 payload without the scheme prefix.
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

impl std::fmt::Display for DataUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "data:{};base64,{}", self.mime, self.payload)
    }
}

impl TryFrom<String> for DataUri {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DataUri> for String {
    fn from(value: DataUri) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_png_data_uri() {
        let uri = DataUri::parse("data:image/png;base64,AAAA").expect("valid uri");
        assert_eq!(uri.mime(), "image/png");
        assert_eq!(uri.to_string(), "data:image/png;base64,AAAA");
    }

    #[test]
    fn rejects_missing_scheme() {
        assert!(DataUri::parse("image/png;base64,AAAA").is_err());
    }

    #[test]
    fn rejects_unsupported_mime() {
        let err = DataUri::parse("data:image/gif;base64,AAAA").expect_err("gif not accepted");
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(DataUri::parse("data:image/png;base64,!!!").is_err());
    }

    #[test]
    fn bytes_round_trip() {
        let bytes = vec![1u8, 2, 3, 4];
        let uri = DataUri::from_bytes("image/jpeg", &bytes).expect("valid bytes");
        assert_eq!(uri.to_bytes(), bytes);
    }

    #[test]
    fn serde_rejects_malformed_string() {
        let result: Result<DataUri, _> = serde_json::from_str("\"not-a-data-uri\"");
        assert!(result.is_err());
    }
}
