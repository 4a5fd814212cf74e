//! Raster image module
//!
//! This module provides the in-memory pixel grid and format-agnostic image reading.

mod reader;
mod tiff_reader;
pub mod types;

pub use reader::RasterReader;
pub use tiff_reader::TiffRasterReader;
pub use types::{Color, RasterImage};
