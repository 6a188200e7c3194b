use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use bmp_batch_rs::image_pipeline::{BatchConfig, BatchPipeline};
use bmp_batch_rs::logger;

#[derive(Parser)]
#[command(name = "bmp_batch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Filter 24-bit BMP images and classify the nearly black ones")]
struct Cli {
    /// Directory holding the input images
    #[arg(short, long, default_value = ".")]
    input_dir: PathBuf,

    /// Only process files whose name starts with this prefix
    #[arg(short = 'N', long, default_value = "")]
    prefix: String,

    /// Number of filters: 1 saturate, 2 + greyscale, 3 + binarize
    #[arg(short, long, default_value_t = 3)]
    filters: usize,

    /// Saturation factor
    #[arg(short = 'p', long, default_value_t = 1.3)]
    saturation: f32,

    /// Binarization threshold in [0, 1]
    #[arg(short = 'u', long, default_value_t = 0.5)]
    binarize_threshold: f32,

    /// Fraction of black pixels in [0, 1] from which an image is nearly black
    #[arg(short = 'v', long, default_value_t = 0.5)]
    classify_threshold: f32,

    /// Directory receiving the filtered images
    #[arg(short = 'C', long, default_value = "output")]
    output_dir: PathBuf,

    /// CSV report path, or `-` for stdout
    #[arg(short = 'R', long, default_value = "report.csv")]
    report: PathBuf,

    /// Process images one at a time
    #[arg(long)]
    sequential: bool,

    /// Classify only, without writing filtered images
    #[arg(long)]
    no_images: bool,

    /// Debug logging
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let config = BatchConfig::builder()
        .prefix(cli.prefix)
        .filters(cli.filters)
        .saturation(cli.saturation)
        .binarize_threshold(cli.binarize_threshold)
        .classify_threshold(cli.classify_threshold)
        .write_images(!cli.no_images)
        .parallel(!cli.sequential)
        .build();
    let pipeline = BatchPipeline::new(config).context("invalid configuration")?;

    info!("Batch pipeline initialized");
    info!("Filters: {}", pipeline.config().filters);
    info!(
        "Thresholds: binarize {}, classify {}",
        pipeline.config().binarize_threshold,
        pipeline.config().classify_threshold
    );

    let report = pipeline
        .process_directory(&cli.input_dir, &cli.output_dir)
        .with_context(|| format!("failed to process {}", cli.input_dir.display()))?;

    if cli.report.as_os_str() == "-" {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        report.write_csv(&mut out).context("failed to write report")?;
        out.flush()?;
    } else {
        report
            .save_csv(&cli.report)
            .with_context(|| format!("failed to write {}", cli.report.display()))?;
    }

    if !report.failures.is_empty() {
        warn!("{} image(s) could not be processed", report.failures.len());
    }

    Ok(())
}
