use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPdfPayload {
    #[serde(default)]
    pub file_name: String,
    /// Base64 PDF body; only checked for presence.
    #[serde(default)]
    pub file_content: String,
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPdfResponse {
    pub success: bool,
    pub extracted_text: String,
    pub page_count: usize,
    pub message: String,
}

impl ProcessPdfResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            extracted_text: String::new(),
            page_count: 0,
            message: message.into(),
        }
    }
}
