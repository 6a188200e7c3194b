//! Image classification module
//!
//! Statistical predicates over a pixel grid, and the per-image result record
//! handed to the report writer.

mod nearly_black;
pub mod types;

pub use nearly_black::{BLACK_LUMINANCE_LIMIT, black_fraction, classify, is_nearly_black};
pub use types::ClassificationResult;
