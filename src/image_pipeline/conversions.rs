//! Pipeline conversions module
//!
//! This module contains orchestration logic for loading, transforming and saving images.

mod automaton_pipeline;


pub use automaton_pipeline::{AutomatonPipeline, LoadedImage, TransformRequest};
