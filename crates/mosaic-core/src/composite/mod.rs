//! Mosaic compositing: painting photos into the cells of an occupancy mask.

mod compositor;
mod pool;

pub use compositor::{
    composite, composite_with_mode, output_dimensions, plan_tiles, CompositeOptions,
    CompositeRaster, PaintMode, TilePlacement,
};
pub use pool::PhotoPool;
