// SPDX-License-Identifier: GPL-3.0-only

//! Axis-aligned bounding box of the foreground silhouette

use crate::errors::{FrameError, FrameResult};
use crate::frame::DepthFrame;
use serde::{Deserialize, Serialize};

/// Smallest rectangle containing every foreground pixel (inclusive bounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

impl BoundingBox {
    /// Number of rows spanned
    pub fn rows(&self) -> usize {
        self.bottom - self.top + 1
    }

    /// Number of columns spanned
    pub fn cols(&self) -> usize {
        self.right - self.left + 1
    }
}

/// Locate the silhouette bounding box
///
/// Rows and columns are scanned independently, so the result is the
/// axis-aligned box, not a contour.
pub fn silhouette_bounds(frame: &DepthFrame) -> FrameResult<BoundingBox> {
    let row_has_fg = |row: usize| (0..frame.width()).any(|col| frame.is_foreground(row, col));
    let col_has_fg = |col: usize| (0..frame.height()).any(|row| frame.is_foreground(row, col));

    let top = (0..frame.height()).find(|&row| row_has_fg(row));
    let bottom = (0..frame.height()).rev().find(|&row| row_has_fg(row));
    let left = (0..frame.width()).find(|&col| col_has_fg(col));
    let right = (0..frame.width()).rev().find(|&col| col_has_fg(col));

    match (top, bottom, left, right) {
        (Some(top), Some(bottom), Some(left), Some(right)) => Ok(BoundingBox {
            top,
            bottom,
            left,
            right,
        }),
        _ => Err(FrameError::NoSilhouetteDetected),
    }
}
