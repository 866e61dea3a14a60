// SPDX-License-Identifier: GPL-3.0-only

//! Body measurement from a depth frame
//!
//! The silhouette bounding box gives one border point per edge; those are
//! unprojected into camera space and:
//! - height = distance(top, bottom)
//! - width = distance(left, right)
//!
//! Single frame, single shot: no smoothing or outlier rejection.

pub mod border;
pub mod bounds;
pub mod projection;

pub use border::{BorderPoint, BorderPoints, BorderSearch, Edge, select_border_points};
pub use bounds::{BoundingBox, silhouette_bounds};
pub use projection::{CameraIntrinsics, Point3D};

use crate::errors::{BorderFailure, FrameError, FrameResult};
use crate::frame::RawDepthMap;
use serde::{Deserialize, Serialize};

/// Height and width in raw depth units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub height: f64,
    pub width: f64,
}

impl Measurement {
    /// Silhouette area proxy used as the last feature
    pub fn area(&self) -> f64 {
        self.height * self.width
    }
}

/// Project one edge's border point, failing if it is absent or has no depth
fn project_edge(
    raw: &RawDepthMap,
    points: &BorderPoints,
    intrinsics: &CameraIntrinsics,
    edge: Edge,
) -> FrameResult<Point3D> {
    let point = points.get(edge).require(edge)?;
    intrinsics
        .project(raw, point.pixel)
        .ok_or(FrameError::NoValidBorderPoint {
            edge,
            reason: BorderFailure::NoNonzeroDepth,
        })
}

/// Compute height and width from the four border points
pub fn measure(
    raw: &RawDepthMap,
    points: &BorderPoints,
    intrinsics: &CameraIntrinsics,
) -> FrameResult<Measurement> {
    let top = project_edge(raw, points, intrinsics, Edge::Top)?;
    let bottom = project_edge(raw, points, intrinsics, Edge::Bottom)?;
    let left = project_edge(raw, points, intrinsics, Edge::Left)?;
    let right = project_edge(raw, points, intrinsics, Edge::Right)?;

    Ok(Measurement {
        height: top.distance(&bottom),
        width: left.distance(&right),
    })
}
