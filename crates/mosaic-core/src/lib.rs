//! Mosaic Core - Photo mosaic generation library
//!
//! This crate turns a template image and a set of photos into a photo
//! mosaic: the template is divided into square cells, cells covered by the
//! template's silhouette are detected, and each of them is painted with a
//! randomly chosen photo. The result can be encoded to JPEG or PNG for
//! download or sharing.
//!
//! The main entry points are [`pipeline::generate_mosaic`] for async
//! sources and [`pipeline::render_mosaic`] for already-decoded rasters.

pub mod composite;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod pipeline;
pub mod template;

#[cfg(test)]
mod test_support;

pub use composite::{composite, CompositeOptions, CompositeRaster, PhotoPool, TilePlacement};
pub use config::MosaicConfig;
pub use decode::{decode_image, DecodeError, FilterType, ImageSource, RasterImage};
pub use encode::{encode, EncodeError, EncodeFormat, EncodeOptions, EncodedMosaic, SharePayload};
pub use error::{MosaicError, Result};
#[cfg(feature = "os-rng")]
pub use pipeline::rng_for;
pub use pipeline::{generate_mosaic, render_mosaic, seeded_rng, Mosaic};
pub use template::{analyze, CellGrid, OccupancyMask, SampleThresholds, TemplateStyle};
