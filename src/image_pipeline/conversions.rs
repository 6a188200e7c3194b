//! Batch conversion module
//!
//! Orchestrates decoding, the filter chain, classification and output for
//! single images and whole directories.

mod batch;
mod report;
pub mod types;


pub use batch::BatchPipeline;
pub use report::{BatchFailure, BatchReport, CSV_HEADER};
pub use types::{BatchConfig, BatchConfigBuilder, FilterStage, ProcessedImage};
