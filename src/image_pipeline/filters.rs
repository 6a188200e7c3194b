//! Per-pixel filters
//!
//! Every filter borrows its input grid and returns a newly allocated one,
//! so filters can be chained and run on independent images concurrently.

mod saturate;
mod greyscale;
mod binarize;

pub use saturate::saturate;
pub use greyscale::{greyscale, luminance};
pub use binarize::binarize;

use crate::image_pipeline::common::error::{PipelineError, Result};

/// Checks that a threshold lies in `[0, 1]`. NaN is rejected.
pub(crate) fn check_unit_threshold(name: &str, threshold: f32) -> Result<()> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(PipelineError::InvalidArgumentError(format!(
            "{} must be within [0, 1], got {}",
            name, threshold
        )))
    }
}

/// Checks that a saturation factor is non-negative. NaN is rejected.
pub(crate) fn check_saturation_factor(factor: f32) -> Result<()> {
    if factor >= 0.0 {
        Ok(())
    } else {
        Err(PipelineError::InvalidArgumentError(format!(
            "saturation factor must be non-negative, got {}",
            factor
        )))
    }
}
