//! Configuration passed in from JavaScript.
//!
//! Configs are plain objects with camelCase keys. Missing keys take their
//! defaults, and `undefined` or `null` means the default configuration.

use mosaic_core::config::MosaicConfig;
use mosaic_core::pipeline::{seeded_rng, MosaicRng};
use wasm_bindgen::prelude::*;

/// Deserialize and validate a config object.
pub(crate) fn config_from_js(value: JsValue) -> Result<MosaicConfig, JsValue> {
    let config: MosaicConfig = if value.is_undefined() || value.is_null() {
        MosaicConfig::default()
    } else {
        serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(config)
}

/// The RNG for a run: seeded from `config.seed`, or from `Math.random()`.
///
/// The WASM build has no OS entropy source, so the unseeded case draws
/// 64 bits from the JS engine.
pub(crate) fn rng_for(config: &MosaicConfig) -> MosaicRng {
    let seed = config
        .seed
        .unwrap_or_else(|| seed_from_unit_pair(js_sys::Math::random(), js_sys::Math::random()));
    seeded_rng(seed)
}

/// The default configuration as a JS object.
///
/// ```typescript
/// const config = default_config();
/// config.cellSize = 30;
/// const mosaic = generate_mosaic(template, photos, config);
/// ```
#[wasm_bindgen]
pub fn default_config() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&MosaicConfig::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Combine two `[0, 1)` floats into a 64-bit seed.
fn seed_from_unit_pair(high: f64, low: f64) -> u64 {
    let half = |u: f64| (u.clamp(0.0, 1.0) * u32::MAX as f64) as u64;
    (half(high) << 32) | half(low)
}

#[cfg(test)]
mod tests {
    use super::seed_from_unit_pair;

    #[test]
    fn test_seed_from_unit_pair() {
        assert_eq!(seed_from_unit_pair(0.0, 0.0), 0);
        assert_eq!(seed_from_unit_pair(0.0, 1.0), u32::MAX as u64);
        assert_eq!(seed_from_unit_pair(1.0, 0.0), (u32::MAX as u64) << 32);
        assert_ne!(seed_from_unit_pair(0.25, 0.5), seed_from_unit_pair(0.5, 0.25));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_undefined_is_default() {
        assert_eq!(
            config_from_js(JsValue::UNDEFINED).unwrap(),
            MosaicConfig::default()
        );
    }

    #[wasm_bindgen_test]
    fn test_partial_config_takes_defaults() {
        let obj = js_sys::Object::new();
        js_sys::Reflect::set(&obj, &"cellSize".into(), &JsValue::from(30)).unwrap();
        let config = config_from_js(obj.into()).unwrap();
        assert_eq!(config.cell_size, 30);
        assert_eq!(config.encode.quality, 85);
    }

    #[wasm_bindgen_test]
    fn test_zero_cell_size_rejected() {
        let obj = js_sys::Object::new();
        js_sys::Reflect::set(&obj, &"cellSize".into(), &JsValue::from(0)).unwrap();
        assert!(config_from_js(obj.into()).is_err());
    }

    #[wasm_bindgen_test]
    fn test_default_config_round_trips() {
        let value = default_config().unwrap();
        assert_eq!(config_from_js(value).unwrap(), MosaicConfig::default());
    }
}
