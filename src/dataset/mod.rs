// SPDX-License-Identifier: GPL-3.0-only

//! Dataset scanning and batch analysis
//!
//! A dataset root holds:
//! - `depth/`     8-bit depth frames (any image format)
//! - `color/`     color frames, matched by file name
//! - `raw_depth/` one `<depth stem>.txt` grid per depth frame
//!
//! Frames are independent, so the batch runs each one on the blocking pool
//! and gathers results in name order. A failed frame never stops the batch.

pub mod loader;
pub mod writer;

pub use loader::{load_depth_frame, load_raw_depth, parse_raw_depth};
pub use writer::{BatchSummary, FeatureWriter, MeasurementLog, write_outputs};

use crate::config::OutputConfig;
use crate::constants::RAW_DEPTH_EXTENSION;
use crate::errors::{DatasetError, DatasetResult, FrameResult};
use crate::pipeline::{FrameAnalysis, FramePipeline};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// One depth frame and its paired inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameEntry {
    /// Depth frame file name, e.g. `subject7.bmp`
    pub name: String,
    pub depth_path: PathBuf,
    pub raw_depth_path: PathBuf,
    /// Matching color frame file name, if any
    pub color_name: Option<String>,
}

impl FrameEntry {
    /// Feature label: characters 1..4 of the color frame name
    pub fn label(&self) -> Option<String> {
        let label: String = self.color_name.as_ref()?.chars().skip(1).take(3).collect();
        (!label.is_empty()).then_some(label)
    }
}

/// Outcome of one frame in a batch
#[derive(Debug, Clone)]
pub struct FrameRecord {
    pub entry: FrameEntry,
    pub outcome: FrameResult<FrameAnalysis>,
}

/// Sorted file names of the regular files in `dir`
fn list_files(dir: &Path) -> DatasetResult<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// First color file whose name contains the depth file name
pub fn match_color<'a>(depth_name: &str, color_names: &'a [String]) -> Option<&'a String> {
    color_names.iter().find(|name| name.contains(depth_name))
}

/// Paired frame listing of a dataset root
#[derive(Debug, Clone)]
pub struct Dataset {
    root: PathBuf,
    entries: Vec<FrameEntry>,
}

impl Dataset {
    /// List depth frames under `root` and pair each with its inputs
    ///
    /// Raw depth files are paired by path only; a missing one surfaces as
    /// that frame's error during analysis.
    pub fn scan(root: &Path, layout: &OutputConfig) -> DatasetResult<Self> {
        let depth_dir = root.join(&layout.depth_dir);
        let raw_dir = root.join(&layout.raw_depth_dir);
        let color_dir = root.join(&layout.color_dir);

        for dir in [&depth_dir, &raw_dir] {
            if !dir.is_dir() {
                return Err(DatasetError::MissingDirectory(dir.clone()));
            }
        }

        let color_names = if color_dir.is_dir() {
            list_files(&color_dir)?
        } else {
            warn!(dir = %color_dir.display(), "No color directory, frames will have no labels");
            Vec::new()
        };

        let entries = list_files(&depth_dir)?
            .into_iter()
            .map(|name| {
                let stem = Path::new(&name)
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| name.clone());
                FrameEntry {
                    depth_path: depth_dir.join(&name),
                    raw_depth_path: raw_dir.join(format!("{}.{}", stem, RAW_DEPTH_EXTENSION)),
                    color_name: match_color(&name, &color_names).cloned(),
                    name,
                }
            })
            .collect::<Vec<_>>();

        info!(root = %root.display(), frames = entries.len(), "Dataset scanned");
        Ok(Self {
            root: root.to_path_buf(),
            entries,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[FrameEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Load and analyze one entry
pub fn analyze_entry(pipeline: &FramePipeline, entry: &FrameEntry) -> FrameResult<FrameAnalysis> {
    let config = pipeline.config();
    let frame = load_depth_frame(&entry.depth_path, config)?;
    let raw = load_raw_depth(&entry.raw_depth_path, config.frame_width, config.frame_height)?;
    pipeline.analyze(&frame, &raw)
}

/// Analyze every frame of `dataset` on the blocking pool
///
/// Results come back sorted by frame name. Per-frame failures are kept in
/// the records; only a crashed worker fails the batch.
pub async fn analyze_dataset(
    dataset: &Dataset,
    pipeline: Arc<FramePipeline>,
) -> DatasetResult<Vec<FrameRecord>> {
    let mut tasks = JoinSet::new();
    for entry in dataset.entries().iter().cloned() {
        let pipeline = Arc::clone(&pipeline);
        tasks.spawn_blocking(move || {
            let outcome = analyze_entry(&pipeline, &entry);
            match &outcome {
                Ok(analysis) => {
                    match &analysis.measurement {
                        Ok(m) => {
                            info!(frame = %entry.name, height = m.height, width = m.width, "Frame measured")
                        }
                        Err(e) => warn!(frame = %entry.name, error = %e, "Measurement invalid"),
                    }
                    if let Err(e) = &analysis.sideview {
                        warn!(frame = %entry.name, error = %e, "Sideview profile invalid");
                    }
                }
                Err(e) => warn!(frame = %entry.name, error = %e, "Frame skipped"),
            }
            FrameRecord { entry, outcome }
        });
    }

    let mut records = Vec::with_capacity(dataset.len());
    while let Some(joined) = tasks.join_next().await {
        records.push(joined?);
    }
    records.sort_by(|a, b| a.entry.name.cmp(&b.entry.name));
    Ok(records)
}
