// SPDX-License-Identifier: GPL-3.0-only

//! End-to-end tests for single-frame analysis on synthetic frames

use bodyshape::config::{GapPolicy, PipelineConfig};
use bodyshape::errors::FrameError;
use bodyshape::frame::{DepthFrame, Pixel, RawDepthMap};
use bodyshape::measure::{BorderSearch, BoundingBox, Edge};
use bodyshape::pipeline::FramePipeline;
use bodyshape::profile::resample;

/// 10x10 frame, background everywhere except a 4x4 block of value 100
fn centered_block() -> DepthFrame {
    DepthFrame::from_fn(10, 10, |row, col| {
        if (3..7).contains(&row) && (3..7).contains(&col) {
            100
        } else {
            255
        }
    })
}

fn pipeline_with_margin(border_margin: usize) -> FramePipeline {
    FramePipeline::new(PipelineConfig {
        border_margin,
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn test_block_bounds_and_border_points() {
    let frame = centered_block();
    let raw = RawDepthMap::uniform(10, 10, 1000.0);
    let analysis = pipeline_with_margin(0).analyze(&frame, &raw).unwrap();

    assert_eq!(
        analysis.bounds,
        BoundingBox {
            top: 3,
            bottom: 6,
            left: 3,
            right: 6
        }
    );

    for (edge, search) in analysis.border_points.iter() {
        let point = search.point().expect("every edge has a point");
        let on_edge = match edge {
            Edge::Top => point.pixel.row == 3,
            Edge::Bottom => point.pixel.row == 6,
            Edge::Left => point.pixel.col == 3,
            Edge::Right => point.pixel.col == 6,
        };
        assert!(on_edge, "{} point {:?} is off its edge", edge, point.pixel);
        assert_eq!(point.depth, 1000.0);
    }
}

#[test]
fn test_uniform_plane_height_width() {
    let frame = centered_block();
    let raw = RawDepthMap::uniform(10, 10, 1000.0);
    let pipeline = pipeline_with_margin(0);
    let intrinsics = pipeline.config().intrinsics;

    let m = pipeline.analyze(&frame, &raw).unwrap().measurement.unwrap();

    // Block spans 3 pixel steps in each direction at depth 1000
    let expected_height = 3.0 * 1000.0 / intrinsics.fy;
    let expected_width = 3.0 * 1000.0 / intrinsics.fx;
    assert!((m.height - expected_height).abs() <= 1e-6 * expected_height);
    assert!((m.width - expected_width).abs() <= 1e-6 * expected_width);
}

#[test]
fn test_nearest_pixel_wins_on_edge() {
    let frame = DepthFrame::from_fn(40, 40, |row, col| {
        if (5..35).contains(&row) && (10..30).contains(&col) {
            80
        } else {
            255
        }
    });
    // Head closer to the camera in the middle of the top inset row
    let raw = RawDepthMap::from_fn(40, 40, |row, col| match (row, col) {
        (8, 21) => 950.0,
        (8, 14) => 0.0,
        _ => 1200.0,
    });
    let analysis = pipeline_with_margin(3).analyze(&frame, &raw).unwrap();
    let top = analysis.border_points.top.point().unwrap();
    assert_eq!(top.pixel, Pixel::new(8, 21));
    assert_eq!(top.depth, 950.0);
}

#[test]
fn test_default_margin_swallows_tiny_block() {
    let frame = centered_block();
    let raw = RawDepthMap::uniform(10, 10, 1000.0);
    let analysis = pipeline_with_margin(3).analyze(&frame, &raw).unwrap();
    assert!(matches!(
        analysis.measurement,
        Err(FrameError::NoValidBorderPoint { .. })
    ));
    assert!(matches!(
        analysis.border_points.top,
        BorderSearch::NotFound(_)
    ));
}

#[test]
fn test_gap_row_marks_profile_only() {
    // Two blobs with an empty row between them
    let frame = DepthFrame::from_fn(12, 12, |row, col| {
        let upper = (1..5).contains(&row) && (3..9).contains(&col);
        let lower = (6..11).contains(&row) && (3..9).contains(&col);
        if upper || lower { 60 } else { 255 }
    });
    let raw = RawDepthMap::uniform(12, 12, 1500.0);

    let analysis = pipeline_with_margin(0).analyze(&frame, &raw).unwrap();
    assert_eq!(
        analysis.sideview,
        Err(FrameError::DegenerateProfileRow { row: 5 })
    );
    assert!(analysis.measurement.is_ok());

    let skipping = FramePipeline::new(PipelineConfig {
        border_margin: 0,
        gap_policy: GapPolicy::Skip,
        ..Default::default()
    })
    .unwrap();
    let analysis = skipping.analyze(&frame, &raw).unwrap();
    assert_eq!(analysis.sideview.unwrap().len(), 200);
}

#[test]
fn test_batch_continues_after_failure() {
    let pipeline = pipeline_with_margin(0);
    let raw = RawDepthMap::uniform(10, 10, 1000.0);
    let frames = [DepthFrame::blank(10, 10), centered_block()];

    let outcomes: Vec<_> = frames.iter().map(|f| pipeline.analyze(f, &raw)).collect();
    assert_eq!(outcomes[0], Err(FrameError::NoSilhouetteDetected));
    assert!(outcomes[1].as_ref().unwrap().is_complete());
}

#[test]
fn test_descriptor_feeds_back_unchanged() {
    let frame = DepthFrame::from_fn(30, 90, |row, col| {
        let half_width = 3 + row / 6;
        if (5..85).contains(&row) && col.abs_diff(15) <= half_width {
            (40 + row) as u8
        } else {
            255
        }
    });
    let raw = RawDepthMap::uniform(30, 90, 2000.0);
    let descriptor = pipeline_with_margin(3)
        .analyze(&frame, &raw)
        .unwrap()
        .sideview
        .unwrap();

    assert_eq!(descriptor.len(), 200);
    let again = resample::resample(descriptor.values(), 200).unwrap();
    assert_eq!(again, descriptor.values());
}
