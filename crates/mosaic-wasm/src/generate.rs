//! Mosaic generation bindings.
//!
//! # Functions
//!
//! - [`generate_mosaic`] - Build a mosaic from already-loaded bytes
//! - [`generate_mosaic_async`] - Build a mosaic from pending loads
//! - [`analyze_template`] - Preview which cells a template fills
//!
//! # Example
//!
//! ```typescript
//! import { generate_mosaic_async } from '@photo-mosaic/wasm';
//!
//! const template = file.arrayBuffer().then((b) => new Uint8Array(b));
//! const photos = photoFiles.map((f) => f.arrayBuffer().then((b) => new Uint8Array(b)));
//! const mosaic = await generate_mosaic_async(template, photos, { cellSize: 50 });
//! ```

use js_sys::{Array, Promise, Uint8Array};
use mosaic_core::composite::PhotoPool;
use mosaic_core::decode::{decode_image, DecodeError, ImageSource};
use mosaic_core::pipeline;
use mosaic_core::template::analyze;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::config::{config_from_js, rng_for};
use crate::types::{JsMosaic, JsOccupancyMask};

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Best-effort message for a rejected promise.
fn rejection_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| "image load was rejected".to_string())
}

/// Await a JS value and read it as image bytes.
///
/// Promises and plain values are both accepted; the resolved value may be a
/// `Uint8Array` or an `ArrayBuffer`.
async fn load(value: JsValue) -> Result<ImageSource, DecodeError> {
    let resolved = JsFuture::from(Promise::resolve(&value))
        .await
        .map_err(|e| DecodeError::LoadFailed(rejection_message(&e)))?;
    Ok(ImageSource::Encoded(Uint8Array::new(&resolved).to_vec()))
}

/// Build a mosaic from a template and photos that are already in memory.
///
/// # Arguments
///
/// * `template` - Encoded template image (PNG or JPEG)
/// * `photos` - Array of `Uint8Array`, one per photo
/// * `config` - Optional config object, e.g. `{ cellSize: 40, seed: 7 }`
///
/// # Errors
///
/// Returns an error string if there are no photos, any image fails to
/// decode, or the config is invalid.
#[wasm_bindgen]
pub fn generate_mosaic(template: &[u8], photos: Array, config: JsValue) -> Result<JsMosaic, JsValue> {
    let config = config_from_js(config)?;
    if photos.length() == 0 {
        return Err(to_js(mosaic_core::MosaicError::EmptyPhotoPool));
    }

    let template = decode_image(template).map_err(to_js)?;
    let photos = photos
        .iter()
        .map(|value| decode_image(&Uint8Array::new(&value).to_vec()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_js)?;
    let pool = PhotoPool::new(photos).map_err(to_js)?;

    let mosaic =
        pipeline::render_mosaic(&template, &pool, &config, &mut rng_for(&config)).map_err(to_js)?;
    Ok(JsMosaic::new(mosaic))
}

/// Build a mosaic from pending loads.
///
/// Every load runs concurrently and decoding waits for all of them. The first
/// rejected or undecodable input rejects the returned promise.
#[wasm_bindgen]
pub async fn generate_mosaic_async(
    template: JsValue,
    photos: Array,
    config: JsValue,
) -> Result<JsMosaic, JsValue> {
    let config = config_from_js(config)?;
    let mut rng = rng_for(&config);

    let photo_loads: Vec<_> = photos.iter().map(load).collect();
    let mosaic = pipeline::generate_mosaic(load(template), photo_loads, &config, &mut rng)
        .await
        .map_err(to_js)?;
    Ok(JsMosaic::new(mosaic))
}

/// Analyze a template without compositing, for previewing the cell grid.
///
/// `cell_size` overrides the config's cell size.
#[wasm_bindgen]
pub fn analyze_template(
    template: &[u8],
    cell_size: u32,
    config: JsValue,
) -> Result<JsOccupancyMask, JsValue> {
    let mut config = config_from_js(config)?;
    config.cell_size = cell_size;
    config.validate().map_err(to_js)?;

    let template = decode_image(template).map_err(to_js)?;
    let mask = analyze(&template, config.cell_size, &config.analyze_options()).map_err(to_js)?;
    Ok(JsOccupancyMask::from_mask(mask))
}
