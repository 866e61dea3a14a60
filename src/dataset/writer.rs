// SPDX-License-Identifier: GPL-3.0-only

//! Feature-vector and diagnostics output
//!
//! Feature lines use a sparse `label index:value` layout:
//!
//! ```text
//! 012 1:1.53 2:1.53 ... 200:1.02 201:52013.7
//! ```
//!
//! Indices `1..=N` hold the sideview descriptor, index `N + 1` holds
//! `height * width` (201 for the default 200-value descriptor).

use super::FrameRecord;
use crate::errors::{DatasetResult, FrameResult};
use crate::measure::{BorderSearch, Edge, Measurement};
use crate::pipeline::FrameAnalysis;
use crate::profile::SideviewDescriptor;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

/// Writes one feature line per fully analyzed frame
pub struct FeatureWriter<W: Write> {
    out: W,
}

impl<W: Write> FeatureWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write_line(
        &mut self,
        label: &str,
        descriptor: &SideviewDescriptor,
        measurement: &Measurement,
    ) -> std::io::Result<()> {
        write!(self.out, "{}", label)?;
        for (i, value) in descriptor.values().iter().enumerate() {
            write!(self.out, " {}:{}", i + 1, value)?;
        }
        writeln!(self.out, " {}:{}", descriptor.len() + 1, measurement.area())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Writes a human-readable block per frame: border points, depths, size
pub struct MeasurementLog<W: Write> {
    out: W,
}

impl<W: Write> MeasurementLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write_frame(
        &mut self,
        name: &str,
        outcome: &FrameResult<FrameAnalysis>,
    ) -> std::io::Result<()> {
        writeln!(self.out, "{}:", name)?;
        let analysis = match outcome {
            Ok(analysis) => analysis,
            Err(e) => {
                writeln!(self.out, "skipped: {}", e)?;
                return writeln!(self.out);
            }
        };

        let pixels: Vec<String> = analysis
            .border_points
            .iter()
            .map(|(_, search)| match search {
                BorderSearch::Found(p) => format!("({}, {})", p.pixel.row, p.pixel.col),
                BorderSearch::NotFound(_) => "none".to_string(),
            })
            .collect();
        writeln!(self.out, "top, btm, left, right = ({})", pixels.join(", "))?;

        for (edge, search) in analysis.border_points.iter() {
            let label = match edge {
                Edge::Bottom => "btm",
                other => other.name(),
            };
            match search {
                BorderSearch::Found(p) => writeln!(self.out, "{} depth: {}", label, p.depth)?,
                BorderSearch::NotFound(reason) => {
                    writeln!(self.out, "{} depth: none ({})", label, reason)?
                }
            }
        }

        match &analysis.measurement {
            Ok(m) => writeln!(self.out, "height, width = ({}, {})", m.height, m.width)?,
            Err(e) => writeln!(self.out, "height, width = invalid ({})", e)?,
        }
        writeln!(self.out)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Counts for one batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Frames attempted
    pub processed: usize,
    /// Frames with valid height and width
    pub measured: usize,
    /// Frames with a valid descriptor
    pub profiled: usize,
    /// Frames that failed before analysis or had no silhouette
    pub failed: usize,
    /// Feature lines written
    pub features_written: usize,
}

/// Write the feature file and diagnostics log for a finished batch
pub fn write_outputs(
    records: &[FrameRecord],
    features_path: &Path,
    measurements_path: &Path,
) -> DatasetResult<BatchSummary> {
    let mut features = FeatureWriter::new(BufWriter::new(File::create(features_path)?));
    let mut log = MeasurementLog::new(BufWriter::new(File::create(measurements_path)?));
    let mut summary = BatchSummary::default();

    for record in records {
        summary.processed += 1;
        log.write_frame(&record.entry.name, &record.outcome)?;

        let analysis = match &record.outcome {
            Ok(analysis) => analysis,
            Err(_) => {
                summary.failed += 1;
                continue;
            }
        };
        if analysis.measurement.is_ok() {
            summary.measured += 1;
        }
        if analysis.sideview.is_ok() {
            summary.profiled += 1;
        }

        let (Ok(measurement), Ok(descriptor)) = (&analysis.measurement, &analysis.sideview) else {
            continue;
        };
        match record.entry.label() {
            Some(label) => {
                features.write_line(&label, descriptor, measurement)?;
                summary.features_written += 1;
            }
            None => warn!(frame = %record.entry.name, "No color frame match, feature line skipped"),
        }
    }

    features.into_inner().flush()?;
    log.into_inner().flush()?;

    info!(
        processed = summary.processed,
        measured = summary.measured,
        profiled = summary.profiled,
        failed = summary.failed,
        features = summary.features_written,
        "Batch outputs written"
    );
    Ok(summary)
}
