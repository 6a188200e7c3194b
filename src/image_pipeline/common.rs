//! Common utilities module
//!
//! This module contains the error taxonomy and the pixel container shared
//! by the codec, the filters and the classifier.

pub mod error;
pub mod grid;

pub use error::{PipelineError, Result};
pub use grid::{PixelGrid, Rgb};
