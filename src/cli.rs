// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! - Batch feature extraction over a dataset directory
//! - Single-frame analysis with JSON output
//! - Printing the effective configuration

use bodyshape::Config;
use bodyshape::dataset::{self, Dataset};
use bodyshape::pipeline::FramePipeline;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Process every frame of a dataset and write feature + diagnostics files
pub fn extract(
    config: Config,
    root: PathBuf,
    features: Option<PathBuf>,
    measurements: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let features_path = features.unwrap_or_else(|| config.output.features_file.clone());
    let measurements_path = measurements.unwrap_or_else(|| config.output.measurements_file.clone());

    let dataset = Dataset::scan(&root, &config.output)?;
    if dataset.is_empty() {
        println!("No depth frames found in {}", root.display());
        return Ok(());
    }

    println!("Feature Extraction");
    println!("==================");
    println!("Dataset: {}", root.display());
    println!("Frames:  {}", dataset.len());
    println!();

    let pipeline = Arc::new(FramePipeline::new(config.pipeline)?);
    let start = Instant::now();

    let rt = tokio::runtime::Runtime::new()?;
    let records = rt.block_on(dataset::analyze_dataset(&dataset, pipeline))?;

    let summary = dataset::write_outputs(&records, &features_path, &measurements_path)?;

    println!("Processed: {}", summary.processed);
    println!("Measured:  {}", summary.measured);
    println!("Profiled:  {}", summary.profiled);
    println!("Failed:    {}", summary.failed);
    println!();
    println!(
        "Features:     {} ({} lines)",
        features_path.display(),
        summary.features_written
    );
    println!("Measurements: {}", measurements_path.display());
    println!("Elapsed: {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}

/// Analyze one depth frame / raw depth pair and print a JSON summary
pub fn measure(
    config: Config,
    depth: PathBuf,
    raw_depth: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = FramePipeline::new(config.pipeline)?;
    let settings = pipeline.config();

    let frame = dataset::load_depth_frame(&depth, settings)?;
    let raw = dataset::load_raw_depth(&raw_depth, settings.frame_width, settings.frame_height)?;
    let analysis = pipeline.analyze(&frame, &raw)?;

    let name = depth
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| depth.display().to_string());
    let summary = analysis.summary(&name);
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

/// Print the configuration that would be used
pub fn print_config(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
