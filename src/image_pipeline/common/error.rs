use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Not a BMP file: {0}")]
    FormatError(String),

    #[error("Unsupported BMP variant: {0}")]
    UnsupportedFormatError(String),

    #[error("Truncated BMP data: expected {expected} bytes, got {actual}")]
    TruncatedDataError { expected: usize, actual: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgumentError(String),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
