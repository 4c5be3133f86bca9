use serde::{Deserialize, Serialize};

/// A pending file selected for upload, held until the user confirms.
///
/// Cleared on successful upload; replaced wholesale when a new file is
/// picked or dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadCandidate {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadCandidate {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        UploadCandidate {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }
}
