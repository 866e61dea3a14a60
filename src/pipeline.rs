// SPDX-License-Identifier: GPL-3.0-only

//! Per-frame analysis pipeline
//!
//! Runs bounds -> border points -> projection -> measurement, and
//! bounds -> sideview profile, for one already-paired depth frame and raw
//! depth map. Only a missing silhouette (or mismatched inputs) fails the
//! whole frame; measurement and profile fail independently of each other.

use crate::config::PipelineConfig;
use crate::errors::{DatasetResult, FrameError, FrameResult};
use crate::frame::{DepthFrame, Pixel, RawDepthMap};
use crate::measure::{
    self, BorderPoints, BorderSearch, BoundingBox, Edge, Measurement, select_border_points,
    silhouette_bounds,
};
use crate::profile::{SideviewDescriptor, SideviewProfiler};
use serde::Serialize;
use tracing::debug;

/// Everything derived from one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameAnalysis {
    pub bounds: BoundingBox,
    pub border_points: BorderPoints,
    pub measurement: FrameResult<Measurement>,
    pub sideview: FrameResult<SideviewDescriptor>,
}

impl FrameAnalysis {
    /// Both measurement and descriptor are valid
    pub fn is_complete(&self) -> bool {
        self.measurement.is_ok() && self.sideview.is_ok()
    }

    /// Serializable view for reports
    pub fn summary(&self, name: &str) -> FrameSummary {
        let border_points = self
            .border_points
            .iter()
            .map(|(edge, search)| match search {
                BorderSearch::Found(point) => BorderSummary {
                    edge,
                    pixel: Some(point.pixel),
                    depth: Some(point.depth),
                    error: None,
                },
                BorderSearch::NotFound(reason) => BorderSummary {
                    edge,
                    pixel: None,
                    depth: None,
                    error: Some(reason.to_string()),
                },
            })
            .collect();

        let (measurement, measurement_error) = split(&self.measurement);
        let (sideview, sideview_error) = split(&self.sideview);

        FrameSummary {
            name: name.to_string(),
            bounds: self.bounds,
            border_points,
            measurement,
            measurement_error,
            sideview,
            sideview_error,
        }
    }
}

fn split<T: Clone>(result: &FrameResult<T>) -> (Option<T>, Option<String>) {
    match result {
        Ok(value) => (Some(value.clone()), None),
        Err(e) => (None, Some(e.to_string())),
    }
}

/// One edge in a [`FrameSummary`]
#[derive(Debug, Clone, Serialize)]
pub struct BorderSummary {
    pub edge: Edge,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel: Option<Pixel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Diagnostic view of a [`FrameAnalysis`]
#[derive(Debug, Clone, Serialize)]
pub struct FrameSummary {
    pub name: String,
    pub bounds: BoundingBox,
    pub border_points: Vec<BorderSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement: Option<Measurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sideview: Option<SideviewDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sideview_error: Option<String>,
}

/// Stateless frame analyzer; safe to share across worker threads
#[derive(Debug, Clone)]
pub struct FramePipeline {
    config: PipelineConfig,
    profiler: SideviewProfiler,
}

impl FramePipeline {
    pub fn new(config: PipelineConfig) -> DatasetResult<Self> {
        config.validate()?;
        let profiler = SideviewProfiler::new(&config);
        Ok(Self { config, profiler })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Analyze one paired depth frame and raw depth map
    ///
    /// The frame must carry the configured background value, so bounds and
    /// profile agree on what counts as foreground.
    pub fn analyze(&self, frame: &DepthFrame, raw: &RawDepthMap) -> FrameResult<FrameAnalysis> {
        raw.check_aligned(frame)?;
        if frame.background() != self.config.background {
            return Err(FrameError::BackgroundMismatch {
                expected: self.config.background,
                found: frame.background(),
            });
        }

        let bounds = silhouette_bounds(frame)?;
        debug!(
            top = bounds.top,
            bottom = bounds.bottom,
            left = bounds.left,
            right = bounds.right,
            "Silhouette bounds"
        );

        let border_points = select_border_points(raw, &bounds, self.config.border_margin);
        let measurement = measure::measure(raw, &border_points, &self.config.intrinsics);
        let sideview = self.profiler.profile(frame, bounds.top, bounds.bottom);

        Ok(FrameAnalysis {
            bounds,
            border_points,
            measurement,
            sideview,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline(margin: usize) -> FramePipeline {
        FramePipeline::new(PipelineConfig {
            border_margin: margin,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_blank_frame_fails() {
        let frame = DepthFrame::blank(6, 6);
        let raw = RawDepthMap::uniform(6, 6, 900.0);
        assert_eq!(
            pipeline(0).analyze(&frame, &raw),
            Err(FrameError::NoSilhouetteDetected)
        );
    }

    #[test]
    fn test_misaligned_inputs_fail() {
        let frame = DepthFrame::from_fn(6, 6, |_, _| 10);
        let raw = RawDepthMap::uniform(6, 5, 900.0);
        assert!(matches!(
            pipeline(0).analyze(&frame, &raw),
            Err(FrameError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_measurement_and_profile_fail_independently() {
        // Raw depth is zero everywhere, so no border point exists, but the
        // depth frame still yields a profile
        let frame = DepthFrame::from_fn(12, 12, |row, col| {
            if (2..10).contains(&row) && (4..8).contains(&col) { 90 } else { 255 }
        });
        let raw = RawDepthMap::uniform(12, 12, 0.0);
        let analysis = pipeline(1).analyze(&frame, &raw).unwrap();
        assert!(matches!(
            analysis.measurement,
            Err(FrameError::NoValidBorderPoint { .. })
        ));
        assert_eq!(analysis.sideview.as_ref().unwrap().len(), 200);
        assert!(!analysis.is_complete());
    }

    #[test]
    fn test_summary_serializes() {
        let frame = DepthFrame::from_fn(10, 10, |row, col| {
            if (3..7).contains(&row) && (3..7).contains(&col) { 100 } else { 255 }
        });
        let raw = RawDepthMap::uniform(10, 10, 1000.0);
        let analysis = pipeline(0).analyze(&frame, &raw).unwrap();
        let json = serde_json::to_value(analysis.summary("block.bmp")).unwrap();
        assert_eq!(json["name"], "block.bmp");
        assert_eq!(json["bounds"]["top"], 3);
        assert_eq!(json["border_points"][0]["edge"], "top");
        assert_eq!(json["sideview"].as_array().unwrap().len(), 200);
        assert!(json.get("measurement_error").is_none());
    }

    fn dark_background_frame() -> DepthFrame {
        let data = (0..20 * 20)
            .map(|i| {
                let (row, col) = (i / 20, i % 20);
                if (4..16).contains(&row) && (4..16).contains(&col) { 100 } else { 0 }
            })
            .collect();
        DepthFrame::with_background(20, 20, data, 0).unwrap()
    }

    #[test]
    fn test_configured_background_drives_bounds_and_profile() {
        let pipeline = FramePipeline::new(PipelineConfig {
            background: 0,
            border_margin: 1,
            ..Default::default()
        })
        .unwrap();
        let raw = RawDepthMap::uniform(20, 20, 1500.0);
        let analysis = pipeline.analyze(&dark_background_frame(), &raw).unwrap();

        assert_eq!(
            analysis.bounds,
            BoundingBox {
                top: 4,
                bottom: 15,
                left: 4,
                right: 15,
            }
        );
        let sideview = analysis.sideview.unwrap();
        assert_eq!(sideview.len(), 200);
        assert!(sideview.values().iter().all(|&v| (v - 1.0).abs() < 1e-12));
        assert!(analysis.measurement.is_ok());
    }

    #[test]
    fn test_frame_background_must_match_config() {
        let pipeline = FramePipeline::new(PipelineConfig {
            background: 0,
            ..Default::default()
        })
        .unwrap();
        let frame = DepthFrame::from_fn(20, 20, |row, col| {
            if (4..16).contains(&row) && (4..16).contains(&col) { 100 } else { 0 }
        });
        let raw = RawDepthMap::uniform(20, 20, 1500.0);
        assert_eq!(
            pipeline.analyze(&frame, &raw),
            Err(FrameError::BackgroundMismatch {
                expected: 0,
                found: 255,
            })
        );
    }
}
