//! Image processing pipeline module
//!
//! This module provides a structured approach to running a two-color cellular
//! automaton over raster images, with separate modules for image reading, TIFF
//! writing, the automaton itself and orchestration.

pub mod raster;
pub mod tiff;
pub mod automaton;
pub mod history;
pub mod conversions;
pub mod common;

pub use common::{
    PipelineError,
    Result,
    PipelineConfig,
    PipelineConfigBuilder,
};

pub use raster::{
    Color,
    RasterImage,
    RasterReader,
    TiffRasterReader,
};

pub use self::tiff::{
    TiffCompression,
    RasterWriter,
    StandardTiffWriter,
};

pub use automaton::{
    CancelToken,
    ChannelProgress,
    Classification,
    ColorClassifier,
    ColorPair,
    GenerationEngine,
    NeighborRule,
    NoProgress,
    ProgressSink,
    TransformHandle,
    get_moore_neighbors_alive,
    spawn_transform,
};

pub use history::ImageHistory;

pub use conversions::{
    AutomatonPipeline,
    LoadedImage,
    TransformRequest,
};
