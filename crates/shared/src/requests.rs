//! Request bodies for the wizard API.

use serde::{Deserialize, Serialize};

/// Free-text submission (product name or description, depending on step).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextMessageRequest {
    pub text: String,
}

/// Product photo upload, already read client-side into a base64 data URI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadRequest {
    pub file_name: String,
    pub data_uri: String,
}

/// Marketing-setting selection that kicks off generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingRequest {
    pub setting: String,
}
