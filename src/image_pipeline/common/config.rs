//! Pipeline configuration types

use crate::image_pipeline::tiff::types::TiffCompression;

/// Default ceiling on the number of generations a single transform may run.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Configuration for loading, transforming and saving an image
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Compression method used when encoding the output TIFF
    pub compression: TiffCompression,
    /// Predictor value for compression (typically 2 for horizontal differencing)
    pub predictor: Option<u16>,
    /// Whether to validate image dimensions after decoding
    pub validate_dimensions: bool,
    /// Largest accepted width or height, checked when validation is enabled
    pub max_dimension: Option<usize>,
    /// Upper bound on requested iterations, `None` for no bound
    pub max_iterations: Option<usize>,
    /// Evaluate the rows of each generation on the rayon thread pool
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            compression: TiffCompression::Lzw,
            predictor: None,
            validate_dimensions: true,
            max_dimension: Some(50_000),
            max_iterations: Some(DEFAULT_MAX_ITERATIONS),
            parallel: false,
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

/// Builder for PipelineConfig
#[derive(Default)]
pub struct PipelineConfigBuilder {
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
    max_iterations: Option<Option<usize>>,
    parallel: Option<bool>,
}

impl PipelineConfigBuilder {
    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn max_iterations(mut self, max: Option<usize>) -> Self {
        self.max_iterations = Some(max);
        self
    }

    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = Some(enable);
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();
        PipelineConfig {
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            max_iterations: self.max_iterations.unwrap_or(default.max_iterations),
            parallel: self.parallel.unwrap_or(default.parallel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = PipelineConfig::builder()
            .compression(TiffCompression::DeflateBest)
            .predictor(Some(2))
            .validate_dimensions(false)
            .max_dimension(Some(10000))
            .max_iterations(None)
            .parallel(true)
            .build();

        assert!(matches!(config.compression, TiffCompression::DeflateBest));
        assert_eq!(config.predictor, Some(2));
        assert!(!config.validate_dimensions);
        assert_eq!(config.max_dimension, Some(10000));
        assert_eq!(config.max_iterations, None);
        assert!(config.parallel);
    }

    #[test]
    fn test_builder_falls_back_to_defaults() {
        let config = PipelineConfig::builder().parallel(true).build();

        assert!(matches!(config.compression, TiffCompression::Lzw));
        assert!(config.validate_dimensions);
        assert_eq!(config.max_iterations, Some(DEFAULT_MAX_ITERATIONS));
    }
}
