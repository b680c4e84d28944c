//! Download and share bindings.
//!
//! ```typescript
//! const file = mosaic.share_file("jpeg", 85);
//! if (navigator.canShare?.({ files: [file] })) {
//!   await navigator.share({ files: [file], title: share_title(), text: share_text() });
//! }
//! ```

use js_sys::{Array, Uint8Array};
use mosaic_core::encode::{SharePayload, SHARE_TEXT, SHARE_TITLE};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::{File, FilePropertyBag};

use crate::types::JsMosaic;

/// Share-sheet metadata, minus the file itself.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ShareData<'a> {
    title: &'a str,
    text: &'a str,
    filename: &'a str,
    mime_type: &'a str,
}

fn payload_for(
    mosaic: &JsMosaic,
    format: Option<String>,
    quality: Option<u8>,
) -> Result<SharePayload, JsValue> {
    mosaic
        .encode_with(format, quality)
        .map(|encoded| encoded.into_share_payload())
        .map_err(|e| JsValue::from_str(&e))
}

fn to_file(payload: &SharePayload) -> Result<File, JsValue> {
    let parts = Array::of1(&Uint8Array::from(payload.bytes.as_slice()));
    let options = FilePropertyBag::new();
    options.set_type(&payload.mime_type);
    File::new_with_u8_array_sequence_and_options(&parts, &payload.filename, &options)
}

#[wasm_bindgen]
impl JsMosaic {
    /// Encode the mosaic and wrap it in a `File` named `photo-mosaic.<ext>`.
    /// Omitted arguments use the mosaic's configured encode options.
    pub fn share_file(&self, format: Option<String>, quality: Option<u8>) -> Result<File, JsValue> {
        to_file(&payload_for(self, format, quality)?)
    }

    /// `{ title, text, filename, mimeType }` for the share sheet.
    pub fn share_data(&self, format: Option<String>, quality: Option<u8>) -> Result<JsValue, JsValue> {
        let payload = payload_for(self, format, quality)?;
        let data = ShareData {
            title: &payload.title,
            text: &payload.text,
            filename: &payload.filename,
            mime_type: &payload.mime_type,
        };
        serde_wasm_bindgen::to_value(&data).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Title shown by the share sheet.
#[wasm_bindgen]
pub fn share_title() -> String {
    SHARE_TITLE.to_string()
}

/// Message shown by the share sheet.
#[wasm_bindgen]
pub fn share_text() -> String {
    SHARE_TEXT.to_string()
}
