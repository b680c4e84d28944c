//! Mosaic configuration and its defaults.
//!
//! Every field has a default, so a partial JSON object from the UI
//! (`{ "cellSize": 30 }`) deserializes into a complete configuration.

use serde::{Deserialize, Serialize};

use crate::composite::CompositeOptions;
use crate::decode::FilterType;
use crate::encode::EncodeOptions;
use crate::error::{MosaicError, Result};
use crate::template::{AnalyzeOptions, SampleThresholds, TemplateStyle};

/// Default cell edge in template pixels.
pub const DEFAULT_CELL_SIZE: u32 = 50;

/// Smallest cell size offered by the UI slider.
pub const MIN_UI_CELL_SIZE: u32 = 20;

/// Largest cell size offered by the UI slider.
pub const MAX_UI_CELL_SIZE: u32 = 100;

/// Samples with alpha above this are part of the silhouette.
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 50;

/// Opaque samples with every RGB channel below this are part of the silhouette.
pub const DEFAULT_LUMINANCE_THRESHOLD: u8 = 100;

pub const DEFAULT_OUTPUT_SCALE: f32 = 1.0;

pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// 256 megapixels, about 1 GiB of RGBA.
pub const DEFAULT_MAX_OUTPUT_PIXELS: u64 = 1 << 28;

/// Everything that controls one mosaic run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MosaicConfig {
    /// Cell edge in template pixels. Any positive value is accepted; the UI
    /// limits it to `MIN_UI_CELL_SIZE..=MAX_UI_CELL_SIZE`.
    pub cell_size: u32,
    pub output_scale: f32,
    pub thresholds: SampleThresholds,
    pub style: TemplateStyle,
    pub filter: FilterType,
    pub max_output_pixels: u64,
    /// Fixes the tile assignment when set.
    pub seed: Option<u64>,
    pub encode: EncodeOptions,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            output_scale: DEFAULT_OUTPUT_SCALE,
            thresholds: SampleThresholds::default(),
            style: TemplateStyle::default(),
            filter: FilterType::default(),
            max_output_pixels: DEFAULT_MAX_OUTPUT_PIXELS,
            seed: None,
            encode: EncodeOptions::default(),
        }
    }
}

impl MosaicConfig {
    /// A default configuration with the given cell size.
    pub fn with_cell_size(cell_size: u32) -> Self {
        Self {
            cell_size,
            ..Self::default()
        }
    }

    /// Reject values no run could succeed with.
    ///
    /// # Errors
    ///
    /// Returns `MosaicError::InvalidConfig` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.cell_size == 0 {
            return Err(MosaicError::InvalidConfig(
                "cellSize must be at least 1".to_string(),
            ));
        }
        if !self.output_scale.is_finite() || self.output_scale <= 0.0 {
            return Err(MosaicError::InvalidConfig(format!(
                "outputScale must be a positive number, got {}",
                self.output_scale
            )));
        }
        if !(1..=100).contains(&self.encode.quality) {
            return Err(MosaicError::InvalidConfig(format!(
                "encode.quality must be between 1 and 100, got {}",
                self.encode.quality
            )));
        }
        if self.max_output_pixels == 0 {
            return Err(MosaicError::InvalidConfig(
                "maxOutputPixels must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn analyze_options(&self) -> AnalyzeOptions {
        AnalyzeOptions {
            thresholds: self.thresholds,
            style: self.style,
        }
    }

    pub fn composite_options(&self) -> CompositeOptions {
        CompositeOptions {
            output_scale: self.output_scale,
            filter: self.filter,
            max_output_pixels: self.max_output_pixels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::EncodeFormat;

    #[test]
    fn test_defaults() {
        let config = MosaicConfig::default();
        assert_eq!(config.cell_size, 50);
        assert_eq!(config.output_scale, 1.0);
        assert_eq!(config.thresholds.alpha, 50);
        assert_eq!(config.thresholds.luminance, 100);
        assert_eq!(config.style, TemplateStyle::Auto);
        assert_eq!(config.filter, FilterType::Bilinear);
        assert_eq!(config.seed, None);
        assert_eq!(config.encode.format, EncodeFormat::Jpeg);
        assert_eq!(config.encode.quality, 85);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ui_range_contains_default() {
        assert!((MIN_UI_CELL_SIZE..=MAX_UI_CELL_SIZE).contains(&DEFAULT_CELL_SIZE));
    }

    #[test]
    fn test_validate_rejects_zero_cell_size() {
        let config = MosaicConfig::with_cell_size(0);
        assert!(matches!(config.validate(), Err(MosaicError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_accepts_cell_size_outside_ui_range() {
        assert!(MosaicConfig::with_cell_size(1).validate().is_ok());
        assert!(MosaicConfig::with_cell_size(500).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_scale() {
        for scale in [0.0, -2.0, f32::NAN, f32::INFINITY] {
            let config = MosaicConfig {
                output_scale: scale,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "scale {scale}");
        }
    }

    #[test]
    fn test_validate_rejects_bad_quality() {
        for quality in [0, 101, 255] {
            let mut config = MosaicConfig::default();
            config.encode.quality = quality;
            assert!(config.validate().is_err(), "quality {quality}");
        }
    }

    #[test]
    fn test_options_carry_fields() {
        let config = MosaicConfig {
            output_scale: 2.5,
            style: TemplateStyle::Luminance,
            filter: FilterType::Nearest,
            max_output_pixels: 77,
            ..Default::default()
        };
        assert_eq!(config.analyze_options().style, TemplateStyle::Luminance);
        let composite = config.composite_options();
        assert_eq!(composite.output_scale, 2.5);
        assert_eq!(composite.filter, FilterType::Nearest);
        assert_eq!(composite.max_output_pixels, 77);
    }
}
