//! Mosaic WASM - WebAssembly bindings for the photo mosaic generator
//!
//! This crate exposes mosaic-core to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `generate` - Mosaic generation and template preview
//! - `types` - WASM-compatible wrappers for mosaics and occupancy masks
//! - `encode` - Share-sheet files and metadata
//! - `config` - Config objects passed from JavaScript
//!
//! # Usage
//!
//! ```typescript
//! import init, { generate_mosaic } from '@photo-mosaic/wasm';
//!
//! await init();
//!
//! const template = new Uint8Array(await templateFile.arrayBuffer());
//! const photos = await Promise.all(files.map(async (f) => new Uint8Array(await f.arrayBuffer())));
//! const mosaic = generate_mosaic(template, photos, { cellSize: 50 });
//! console.log(`Built ${mosaic.width}x${mosaic.height} from ${mosaic.filled_cells} cells`);
//! ```

use wasm_bindgen::prelude::*;

mod config;
mod encode;
mod generate;
mod logger;
mod types;

pub use config::default_config;
pub use encode::{share_text, share_title};
pub use generate::{analyze_template, generate_mosaic, generate_mosaic_async};
pub use types::{JsMosaic, JsOccupancyMask};

/// Initialize the WASM module (called automatically on load)
///
/// Installs the console logger at info level.
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Info);
}

/// Change the console log level (`"debug"`, `"info"`, `"warn"`, `"error"`, `"off"`).
#[wasm_bindgen]
pub fn set_log_level(level: Option<String>) {
    logger::install(logger::parse_level(level.as_deref()));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
