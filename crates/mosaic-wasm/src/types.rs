//! WASM-compatible wrapper types for mosaic results.
//!
//! These wrap the core types and expose JavaScript-friendly accessors.
//! Pixel buffers stay in WASM memory until `pixels()` copies them out.

use mosaic_core::encode::{download_filename, EncodeFormat, EncodeOptions, EncodedMosaic};
use mosaic_core::pipeline::Mosaic;
use mosaic_core::template::{OccupancyMask, TemplateStyle};
use wasm_bindgen::prelude::*;

/// Parse a format name from JS. `undefined` yields `None`, leaving the
/// mosaic's configured format in place.
pub(crate) fn parse_format(name: Option<String>) -> Result<Option<EncodeFormat>, String> {
    name.map(|name| {
        EncodeFormat::from_name(&name).ok_or_else(|| format!("Unsupported format: {}", name))
    })
    .transpose()
}

fn style_name(style: TemplateStyle) -> &'static str {
    match style {
        TemplateStyle::Auto => "auto",
        TemplateStyle::Alpha => "alpha",
        TemplateStyle::Luminance => "luminance",
    }
}

/// A finished mosaic.
///
/// ```typescript
/// const mosaic = generate_mosaic(templateBytes, photoBytes, { cellSize: 40 });
/// const data = new ImageData(new Uint8ClampedArray(mosaic.pixels()), mosaic.width);
/// const jpeg = mosaic.encode("jpeg", 85);
/// ```
#[wasm_bindgen]
pub struct JsMosaic {
    inner: Mosaic,
}

#[wasm_bindgen]
impl JsMosaic {
    /// Output width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Output height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Number of cells that received a photo
    #[wasm_bindgen(getter)]
    pub fn filled_cells(&self) -> usize {
        self.inner.filled_cells()
    }

    /// Returns RGBA pixel data as Uint8Array. This copies the buffer.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.raster().pixels().to_vec()
    }

    /// The occupancy mask the mosaic was painted from.
    pub fn mask(&self) -> JsOccupancyMask {
        JsOccupancyMask::from_mask(self.inner.mask().clone())
    }

    /// Tile placements as `{ column, row, photo, x, y, width, height }` objects.
    pub fn placements(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.placements())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Encode to `"jpeg"` or `"png"`. Omitted arguments fall back to the
    /// `encode` section of the config the mosaic was generated with.
    pub fn encode(&self, format: Option<String>, quality: Option<u8>) -> Result<Vec<u8>, JsValue> {
        self.encode_with(format, quality)
            .map(|encoded| encoded.bytes)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// `photo-mosaic.jpg` or `photo-mosaic.png`, for `format` or else the
    /// configured one.
    pub fn download_filename(&self, format: Option<String>) -> Result<String, JsValue> {
        self.options_with(format, None)
            .map(|options| download_filename(options.format))
            .map_err(|e| JsValue::from_str(&e))
    }
}

impl JsMosaic {
    pub(crate) fn new(inner: Mosaic) -> Self {
        Self { inner }
    }

    /// The mosaic's stored encode options with any JS arguments applied.
    pub(crate) fn options_with(
        &self,
        format: Option<String>,
        quality: Option<u8>,
    ) -> Result<EncodeOptions, String> {
        let stored = *self.inner.encode_options();
        Ok(EncodeOptions {
            format: parse_format(format)?.unwrap_or(stored.format),
            quality: quality.unwrap_or(stored.quality),
            ..stored
        })
    }

    pub(crate) fn encode_with(
        &self,
        format: Option<String>,
        quality: Option<u8>,
    ) -> Result<EncodedMosaic, String> {
        let options = self.options_with(format, quality)?;
        self.inner.encode(&options).map_err(|e| e.to_string())
    }
}

/// Which template cells are covered by the silhouette.
#[wasm_bindgen]
pub struct JsOccupancyMask {
    inner: OccupancyMask,
}

#[wasm_bindgen]
impl JsOccupancyMask {
    #[wasm_bindgen(getter)]
    pub fn columns(&self) -> u32 {
        self.inner.grid().columns()
    }

    #[wasm_bindgen(getter)]
    pub fn rows(&self) -> u32 {
        self.inner.grid().rows()
    }

    #[wasm_bindgen(getter)]
    pub fn cell_size(&self) -> u32 {
        self.inner.grid().cell_size()
    }

    #[wasm_bindgen(getter)]
    pub fn filled_count(&self) -> usize {
        self.inner.filled_count()
    }

    /// `"alpha"` or `"luminance"`: how the template was classified.
    #[wasm_bindgen(getter)]
    pub fn style(&self) -> String {
        style_name(self.inner.style()).to_string()
    }

    pub fn is_filled(&self, column: u32, row: u32) -> bool {
        self.inner.is_filled(column, row)
    }

    /// Row-major occupancy, 1 for filled and 0 for empty.
    pub fn cells(&self) -> Vec<u8> {
        self.inner.iter().map(|(_, filled)| filled as u8).collect()
    }
}

impl JsOccupancyMask {
    pub(crate) fn from_mask(inner: OccupancyMask) -> Self {
        Self { inner }
    }
}
