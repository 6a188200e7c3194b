//! Batch processing configuration and result types

use crate::image_pipeline::classify::ClassificationResult;
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::common::grid::PixelGrid;
use crate::image_pipeline::filters::{check_saturation_factor, check_unit_threshold};

/// One step of the filter chain, in the order they are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStage {
    /// Channel saturation by a constant factor
    Saturated,
    /// Luminance greyscale
    Greyscale,
    /// Threshold binarization
    Binarized,
}

impl FilterStage {
    pub const ALL: [FilterStage; 3] = [
        FilterStage::Saturated,
        FilterStage::Greyscale,
        FilterStage::Binarized,
    ];

    /// The first `count` stages of the chain.
    pub fn chain(count: usize) -> &'static [FilterStage] {
        static CHAIN: [FilterStage; 3] = FilterStage::ALL;
        &CHAIN[..count.min(CHAIN.len())]
    }

    /// Prefix used when naming this stage's output file
    pub fn file_prefix(self) -> &'static str {
        match self {
            FilterStage::Saturated => "saturated",
            FilterStage::Greyscale => "greyscale",
            FilterStage::Binarized => "binarized",
        }
    }
}

/// Everything produced for one input image
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    /// Output of each applied stage, in chain order
    pub stages: Vec<(FilterStage, PixelGrid)>,
    /// Classification of the last stage's output
    pub classification: ClassificationResult,
}

/// Configuration for batch filtering and classification
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Only files whose name starts with this prefix are processed
    pub prefix: String,
    /// Number of filters to apply: 1 saturates, 2 adds greyscale, 3 adds binarization
    pub filters: usize,
    /// Saturation factor, must be non-negative
    pub saturation: f32,
    /// Binarization threshold in `[0, 1]`
    pub binarize_threshold: f32,
    /// Fraction of black pixels in `[0, 1]` above which an image is nearly black
    pub classify_threshold: f32,
    /// Whether filtered images are written to the output directory
    pub write_images: bool,
    /// Whether images in a directory are processed on the rayon thread pool
    pub parallel: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            filters: FilterStage::ALL.len(),
            saturation: 1.3,
            binarize_threshold: 0.5,
            classify_threshold: 0.5,
            write_images: true,
            parallel: true,
        }
    }
}

impl BatchConfig {
    pub fn builder() -> BatchConfigBuilder {
        BatchConfigBuilder::default()
    }

    /// Rejects values outside the ranges the filters and classifier accept.
    pub fn validate(&self) -> Result<()> {
        if self.filters == 0 || self.filters > FilterStage::ALL.len() {
            return Err(PipelineError::InvalidArgumentError(format!(
                "filter count must be between 1 and {}, got {}",
                FilterStage::ALL.len(),
                self.filters
            )));
        }
        check_saturation_factor(self.saturation)?;
        check_unit_threshold("binarization threshold", self.binarize_threshold)?;
        check_unit_threshold("classification threshold", self.classify_threshold)
    }
}

/// Builder for BatchConfig
#[derive(Default)]
pub struct BatchConfigBuilder {
    prefix: Option<String>,
    filters: Option<usize>,
    saturation: Option<f32>,
    binarize_threshold: Option<f32>,
    classify_threshold: Option<f32>,
    write_images: Option<bool>,
    parallel: Option<bool>,
}

impl BatchConfigBuilder {
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn filters(mut self, filters: usize) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn saturation(mut self, factor: f32) -> Self {
        self.saturation = Some(factor);
        self
    }

    pub fn binarize_threshold(mut self, threshold: f32) -> Self {
        self.binarize_threshold = Some(threshold);
        self
    }

    pub fn classify_threshold(mut self, threshold: f32) -> Self {
        self.classify_threshold = Some(threshold);
        self
    }

    pub fn write_images(mut self, enable: bool) -> Self {
        self.write_images = Some(enable);
        self
    }

    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = Some(enable);
        self
    }

    pub fn build(self) -> BatchConfig {
        let default = BatchConfig::default();
        BatchConfig {
            prefix: self.prefix.unwrap_or(default.prefix),
            filters: self.filters.unwrap_or(default.filters),
            saturation: self.saturation.unwrap_or(default.saturation),
            binarize_threshold: self.binarize_threshold.unwrap_or(default.binarize_threshold),
            classify_threshold: self.classify_threshold.unwrap_or(default.classify_threshold),
            write_images: self.write_images.unwrap_or(default.write_images),
            parallel: self.parallel.unwrap_or(default.parallel),
        }
    }
}
