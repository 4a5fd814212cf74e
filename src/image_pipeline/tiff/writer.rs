use std::io::Write;
use crate::image_pipeline::common::config::PipelineConfig;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raster::types::RasterImage;

pub trait RasterWriter {
    fn write_raster(&self, image: &RasterImage, output: &mut dyn Write, config: &PipelineConfig) -> Result<()>;
}
