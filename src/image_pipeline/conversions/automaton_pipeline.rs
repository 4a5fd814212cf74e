use tracing::{info, instrument, warn};
use std::io::Write;
use std::path::Path;

use crate::image_pipeline::{
    automaton::{Classification, ColorClassifier, ColorPair, GenerationEngine, NeighborRule, ProgressSink},
    common::{
        config::PipelineConfig,
        error::{PipelineError, Result},
    },
    raster::{RasterImage, RasterReader, TiffRasterReader},
    tiff::{RasterWriter, StandardTiffWriter},
};

/// A decoded image together with its color classification.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub image: RasterImage,
    pub classification: Classification,
}

/// Parameters of one transform request.
#[derive(Debug, Clone)]
pub struct TransformRequest {
    pub rule: NeighborRule,
    pub iterations: usize,
    /// Explicitly picked colors, used instead of the classified pair
    pub colors: Option<ColorPair>,
    /// Swap the alive and dead roles before running
    pub reverse_colors: bool,
}

impl TransformRequest {
    pub fn new(rule: NeighborRule, iterations: usize) -> Self {
        Self {
            rule,
            iterations,
            colors: None,
            reverse_colors: false,
        }
    }

    pub fn with_colors(mut self, colors: ColorPair) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn reversed(mut self, reverse: bool) -> Self {
        self.reverse_colors = reverse;
        self
    }

    /// Color pair this request runs with for an image classified as `classification`.
    pub fn resolve_colors(&self, classification: &Classification) -> Result<ColorPair> {
        let colors = self
            .colors
            .or_else(|| classification.colors())
            .ok_or(PipelineError::UnsupportedColors)?;

        Ok(if self.reverse_colors { colors.reversed() } else { colors })
    }
}

pub struct AutomatonPipeline<R: RasterReader, W: RasterWriter> {
    reader: R,
    writer: W,
    config: PipelineConfig,
}

impl AutomatonPipeline<TiffRasterReader, StandardTiffWriter> {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            reader: TiffRasterReader,
            writer: StandardTiffWriter,
            config,
        }
    }
}

impl<R: RasterReader, W: RasterWriter> AutomatonPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: PipelineConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!("Image dimensions {}x{} exceed maximum {}", width, height, max);
                return Err(PipelineError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    /// Decodes and classifies an image.
    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn load(&self, input_data: &[u8]) -> Result<LoadedImage> {
        let image = {
            let _span = tracing::info_span!("decode").entered();
            self.reader.read_raster(input_data)?
        };

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = image.width(),
                height = image.height()
            ).entered();
            self.validate_dimensions(image.width(), image.height())?;
        }

        let classification = {
            let _span = tracing::info_span!("classify").entered();
            ColorClassifier.classify(&image)?
        };

        match classification {
            Classification::Supported(colors) => info!(
                width = image.width(),
                height = image.height(),
                alive = %colors.alive,
                dead = %colors.dead,
                "Loaded image"
            ),
            Classification::Unsupported => warn!(
                width = image.width(),
                height = image.height(),
                "Loaded image contains more than two colors"
            ),
        }

        Ok(LoadedImage { image, classification })
    }

    #[instrument(skip(self, input_path))]
    pub fn read_file<P: AsRef<Path>>(&self, input_path: P) -> Result<LoadedImage> {
        let input_path = input_path.as_ref();

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                PipelineError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        self.load(&input_data)
    }

    /// Runs the requested generations over a loaded image.
    pub fn transform(
        &self,
        loaded: &LoadedImage,
        request: &TransformRequest,
        progress: &mut dyn ProgressSink,
    ) -> Result<RasterImage> {
        let colors = request.resolve_colors(&loaded.classification)?;
        let _span = tracing::info_span!("transform", iterations = request.iterations).entered();
        self.engine().run(&loaded.image, colors, &request.rule, request.iterations, progress)
    }

    pub fn encode(&self, image: &RasterImage, output: &mut dyn Write) -> Result<()> {
        let _span = tracing::info_span!("encode_tiff").entered();
        self.writer.write_raster(image, output, &self.config)
    }

    #[instrument(skip(self, image, output_path))]
    pub fn write_file<P: AsRef<Path>>(&self, image: &RasterImage, output_path: P) -> Result<()> {
        let output_path = output_path.as_ref();

        let mut output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(output_path).map_err(|e| {
                PipelineError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?
        };

        self.encode(image, &mut output_file)
    }

    /// Decodes, transforms and re-encodes one image.
    #[instrument(skip(self, input_data, output, request, progress), fields(input_size = input_data.len()))]
    pub fn convert(
        &self,
        input_data: &[u8],
        output: &mut dyn Write,
        request: &TransformRequest,
        progress: &mut dyn ProgressSink,
    ) -> Result<RasterImage> {
        info!("Starting automaton transform");

        let loaded = self.load(input_data)?;
        let image = self.transform(&loaded, request, progress)?;
        self.encode(&image, output)?;

        info!(
            width = image.width(),
            height = image.height(),
            iterations = request.iterations,
            "Conversion complete"
        );
        Ok(image)
    }

    #[instrument(skip(self, input_path, output_path, request, progress))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
        request: &TransformRequest,
        progress: &mut dyn ProgressSink,
    ) -> Result<RasterImage> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let loaded = self.read_file(input_path)?;
        let image = self.transform(&loaded, request, progress)?;
        self.write_file(&image, output_path)?;

        Ok(image)
    }

    /// Engine configured from this pipeline's settings.
    pub fn engine(&self) -> GenerationEngine {
        GenerationEngine::from_config(&self.config)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PipelineConfig) {
        self.config = config;
    }
}
