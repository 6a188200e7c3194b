//! Image processing pipeline module
//!
//! This module provides the 24-bit BMP codec, per-pixel filters, the
//! nearly-black classifier and the batch driver that ties them together.

pub mod bmp;
pub mod filters;
pub mod classify;
pub mod conversions;
pub mod common;

pub use common::{
    PipelineError,
    PixelGrid,
    Result,
    Rgb,
};

pub use bmp::{
    Bitmap,
    BmpReader,
    BmpWriter,
    StandardBmpReader,
    StandardBmpWriter,
};

pub use filters::{
    binarize,
    greyscale,
    luminance,
    saturate,
};

pub use classify::{
    ClassificationResult,
    is_nearly_black,
};

pub use conversions::{
    BatchConfig,
    BatchConfigBuilder,
    BatchPipeline,
    BatchReport,
    FilterStage,
};
