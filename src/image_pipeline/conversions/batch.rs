use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::image_pipeline::{
    bmp::{BmpReader, BmpWriter, StandardBmpReader, StandardBmpWriter},
    classify::{self, ClassificationResult},
    common::{
        error::{PipelineError, Result},
        grid::PixelGrid,
    },
    conversions::{
        report::{BatchFailure, BatchReport},
        types::{BatchConfig, FilterStage, ProcessedImage},
    },
    filters,
};

pub struct BatchPipeline<R: BmpReader, W: BmpWriter> {
    reader: R,
    writer: W,
    config: BatchConfig,
}

impl BatchPipeline<StandardBmpReader, StandardBmpWriter> {
    pub fn new(config: BatchConfig) -> Result<Self> {
        Self::with_custom(StandardBmpReader, StandardBmpWriter, config)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn is_bmp(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("bmp"))
}

impl<R: BmpReader, W: BmpWriter> BatchPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: BatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            reader,
            writer,
            config,
        })
    }

    fn apply_stage(&self, stage: FilterStage, grid: &PixelGrid) -> Result<PixelGrid> {
        match stage {
            FilterStage::Saturated => filters::saturate(grid, self.config.saturation),
            FilterStage::Greyscale => Ok(filters::greyscale(grid)),
            FilterStage::Binarized => filters::binarize(grid, self.config.binarize_threshold),
        }
    }

    /// Runs the configured filter chain, each stage consuming the previous
    /// stage's output.
    pub fn apply_filters(&self, grid: &PixelGrid) -> Result<Vec<(FilterStage, PixelGrid)>> {
        let mut stages: Vec<(FilterStage, PixelGrid)> = Vec::with_capacity(self.config.filters);
        for &stage in FilterStage::chain(self.config.filters) {
            let input = stages.last().map_or(grid, |(_, previous)| previous);
            let _span = tracing::debug_span!("filter", stage = stage.file_prefix()).entered();
            let output = self.apply_stage(stage, input)?;
            stages.push((stage, output));
        }
        Ok(stages)
    }

    /// Decodes, filters and classifies one image held in memory.
    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn process(&self, name: &str, input_data: &[u8]) -> Result<ProcessedImage> {
        let grid = {
            let _span = tracing::info_span!("decode_bmp").entered();
            self.reader.read_bmp(input_data)?
        };

        let stages = self.apply_filters(&grid)?;

        let classification = {
            let _span = tracing::info_span!("classify").entered();
            let last = stages.last().map_or(&grid, |(_, output)| output);
            classify::classify(name, last, self.config.classify_threshold)?
        };

        debug!(
            width = grid.width(),
            height = grid.height(),
            nearly_black = classification.nearly_black,
            "Image processed"
        );
        Ok(ProcessedImage {
            stages,
            classification,
        })
    }

    fn write_stage(&self, grid: &PixelGrid, output_path: &Path) -> Result<()> {
        let file = std::fs::File::create(output_path).map_err(|e| {
            PipelineError::OutputWriteError(format!("{}: {}", output_path.display(), e))
        })?;

        let mut output = BufWriter::new(file);
        self.writer.write_bmp(grid, &mut output)?;
        output.flush()?;
        Ok(())
    }

    /// Processes one file, writing each stage's output into `output_dir` as
    /// `<stage>_<file name>` when image output is enabled.
    #[instrument(skip(self, input_path, output_dir))]
    pub fn process_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_dir: Q,
    ) -> Result<ClassificationResult> {
        let input_path = input_path.as_ref();
        let output_dir = output_dir.as_ref();
        let name = file_name_of(input_path);

        info!(input = %input_path.display(), "Processing file");

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                PipelineError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let processed = self.process(&name, &input_data)?;

        if self.config.write_images {
            let _span = tracing::info_span!("encode_bmp").entered();
            for (stage, grid) in &processed.stages {
                let output_path = output_dir.join(format!("{}_{}", stage.file_prefix(), name));
                self.write_stage(grid, &output_path)?;
            }
        }

        Ok(processed.classification)
    }

    /// Lists the `.bmp` files in `input_dir` that match the configured prefix,
    /// sorted by file name.
    pub fn collect_inputs<P: AsRef<Path>>(&self, input_dir: P) -> Result<Vec<PathBuf>> {
        let input_dir = input_dir.as_ref();
        let entries = std::fs::read_dir(input_dir).map_err(|e| {
            PipelineError::InputReadError(format!("{}: {}", input_dir.display(), e))
        })?;

        let mut inputs = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file()
                && is_bmp(&path)
                && file_name_of(&path).starts_with(&self.config.prefix)
            {
                inputs.push(path);
            }
        }
        inputs.sort();
        Ok(inputs)
    }

    /// Processes every matching image in `input_dir`.
    ///
    /// A failing image is logged and recorded in the report; it never stops
    /// the rest of the batch.
    #[instrument(skip(self, input_dir, output_dir))]
    pub fn process_directory<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_dir: P,
        output_dir: Q,
    ) -> Result<BatchReport>
    where
        R: Sync,
        W: Sync,
    {
        let input_dir = input_dir.as_ref();
        let output_dir = output_dir.as_ref();

        let inputs = self.collect_inputs(input_dir)?;
        if inputs.is_empty() {
            warn!(
                input = %input_dir.display(),
                prefix = %self.config.prefix,
                "No matching BMP files found"
            );
            return Ok(BatchReport::default());
        }

        if self.config.write_images {
            std::fs::create_dir_all(output_dir).map_err(|e| {
                PipelineError::OutputWriteError(format!("{}: {}", output_dir.display(), e))
            })?;
        }

        info!(
            images = inputs.len(),
            parallel = self.config.parallel,
            "Starting batch"
        );

        let run = |path: &PathBuf| (file_name_of(path), self.process_file(path, output_dir));
        let outcomes: Vec<(String, Result<ClassificationResult>)> = if self.config.parallel {
            inputs.par_iter().map(run).collect()
        } else {
            inputs.iter().map(run).collect()
        };

        let mut report = BatchReport::default();
        for (image, outcome) in outcomes {
            match outcome {
                Ok(result) => report.results.push(result),
                Err(e) => {
                    warn!(image = %image, error = %e, "Skipping image");
                    report.failures.push(BatchFailure {
                        image,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            processed = report.results.len(),
            failed = report.failures.len(),
            nearly_black = report.nearly_black_count(),
            "Batch complete"
        );
        Ok(report)
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: BatchConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }
}
