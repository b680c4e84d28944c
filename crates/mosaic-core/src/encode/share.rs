//! Share-sheet payloads.

use serde::{Deserialize, Serialize};

/// File name stem used for downloads and shared files.
pub const DOWNLOAD_BASENAME: &str = "photo-mosaic";

pub const SHARE_TITLE: &str = "My Photo Mosaic";

pub const SHARE_TEXT: &str = "Check out this photo mosaic I created!";

/// A file plus the title and text shown by a platform share sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharePayload {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub filename: String,
    pub mime_type: String,
    pub title: String,
    pub text: String,
}

pub fn to_share_payload(bytes: Vec<u8>, filename: String, mime_type: String) -> SharePayload {
    SharePayload {
        bytes,
        filename,
        mime_type,
        title: SHARE_TITLE.to_string(),
        text: SHARE_TEXT.to_string(),
    }
}
