use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode TIFF image: {0}")]
    DecodeError(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Image contains more than two colors")]
    UnsupportedColors,

    #[error("Alive and dead colors must differ")]
    InvalidColorPair,

    #[error("Invalid neighbor rule: {0}")]
    InvalidRule(String),

    #[error("Iteration count {requested} exceeds maximum {max}")]
    InvalidIterationCount { requested: usize, max: usize },

    #[error("Transform cancelled")]
    Cancelled,

    #[error("Transform worker panicked")]
    WorkerPanicked,

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
