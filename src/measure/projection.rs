// SPDX-License-Identifier: GPL-3.0-only

//! Pinhole back-projection from (pixel, depth) to camera space

use crate::constants::{RAW_DEPTH_INVALID, kinect};
use crate::frame::{Pixel, RawDepthMap};
use serde::{Deserialize, Serialize};

/// Fixed pinhole intrinsics of the capturing depth camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    pub fx: f64,
    pub fy: f64,
    pub cx: f64,
    pub cy: f64,
}

impl Default for CameraIntrinsics {
    fn default() -> Self {
        // Kinect v1, 640x480 depth stream
        Self {
            fx: kinect::FX,
            fy: kinect::FY,
            cx: kinect::CX,
            cy: kinect::CY,
        }
    }
}

/// A point in camera space, in raw depth units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance
    pub fn distance(&self, other: &Point3D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl CameraIntrinsics {
    /// Unproject a pixel at a known depth
    ///
    /// ```text
    /// x = (col - cx) * depth / fx
    /// y = (row - cy) * depth / fy
    /// z = depth
    /// ```
    pub fn unproject(&self, pixel: Pixel, depth: f64) -> Point3D {
        Point3D {
            x: (pixel.col as f64 - self.cx) * depth / self.fx,
            y: (pixel.row as f64 - self.cy) * depth / self.fy,
            z: depth,
        }
    }

    /// Unproject a pixel using its reading from `raw`
    ///
    /// Returns `None` for an invalid (zero) reading instead of the
    /// degenerate origin point.
    pub fn project(&self, raw: &RawDepthMap, pixel: Pixel) -> Option<Point3D> {
        let depth = raw.at(pixel);
        if depth == RAW_DEPTH_INVALID || !depth.is_finite() {
            return None;
        }
        Some(self.unproject(pixel, depth))
    }
}
