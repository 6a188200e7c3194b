//! Batch results and the CSV classification report

use std::borrow::Cow;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::image_pipeline::classify::ClassificationResult;
use crate::image_pipeline::common::error::{PipelineError, Result};

pub const CSV_HEADER: &str = "image,nearly_black";

/// An image the batch skipped, with the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub image: String,
    pub error: String,
}

/// Outcome of a directory batch, in file-name order
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub results: Vec<ClassificationResult>,
    pub failures: Vec<BatchFailure>,
}

fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

impl BatchReport {
    pub fn nearly_black_count(&self) -> usize {
        self.results.iter().filter(|r| r.nearly_black).count()
    }

    /// Writes one `image,nearly_black` row per classified image, `1` or `0`.
    pub fn write_csv(&self, output: &mut dyn Write) -> Result<()> {
        writeln!(output, "{}", CSV_HEADER)?;
        for result in &self.results {
            writeln!(
                output,
                "{},{}",
                csv_field(&result.image),
                u8::from(result.nearly_black)
            )?;
        }
        Ok(())
    }

    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|e| {
            PipelineError::OutputWriteError(format!("{}: {}", path.display(), e))
        })?;

        let mut output = BufWriter::new(file);
        self.write_csv(&mut output)?;
        output.flush()?;

        info!(
            report = %path.display(),
            rows = self.results.len(),
            "Classification report written"
        );
        Ok(())
    }
}
