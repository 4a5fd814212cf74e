//! Common utilities module
//!
//! This module contains shared utilities used across the image pipeline.

pub mod error;
pub mod config;

pub use error::{PipelineError, Result};
pub use config::{PipelineConfig, PipelineConfigBuilder};
