// SPDX-License-Identifier: GPL-3.0-only

//! Border point selection
//!
//! For each bounding-box edge, pick the pixel on that edge nearest the
//! camera. Bounds are first pulled inward by a margin so silhouette fringe
//! pixels (where depth readings are noisy) are never chosen. The search
//! segment of an edge runs along the inset row/column between the two
//! orthogonal inset bounds, both ends inclusive.
//!
//! Ties on the minimum reading go to the first pixel in scan order
//! (left to right for top/bottom, top to bottom for left/right).

use super::bounds::BoundingBox;
use crate::constants::RAW_DEPTH_INVALID;
use crate::errors::{BorderFailure, FrameError, FrameResult};
use crate::frame::{Pixel, RawDepthMap};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A bounding-box edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    pub fn name(&self) -> &'static str {
        match self {
            Edge::Top => "top",
            Edge::Bottom => "bottom",
            Edge::Left => "left",
            Edge::Right => "right",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Chosen pixel on one edge and its raw depth reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderPoint {
    pub pixel: Pixel,
    pub depth: f64,
}

/// Outcome of searching one edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BorderSearch {
    Found(BorderPoint),
    NotFound(BorderFailure),
}

impl BorderSearch {
    pub fn point(&self) -> Option<&BorderPoint> {
        match self {
            BorderSearch::Found(point) => Some(point),
            BorderSearch::NotFound(_) => None,
        }
    }

    /// Turn absence into the frame-level error for `edge`
    pub fn require(&self, edge: Edge) -> FrameResult<BorderPoint> {
        match *self {
            BorderSearch::Found(point) => Ok(point),
            BorderSearch::NotFound(reason) => Err(FrameError::NoValidBorderPoint { edge, reason }),
        }
    }
}

/// One search outcome per edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderPoints {
    pub top: BorderSearch,
    pub bottom: BorderSearch,
    pub left: BorderSearch,
    pub right: BorderSearch,
}

impl BorderPoints {
    pub fn get(&self, edge: Edge) -> &BorderSearch {
        match edge {
            Edge::Top => &self.top,
            Edge::Bottom => &self.bottom,
            Edge::Left => &self.left,
            Edge::Right => &self.right,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Edge, &BorderSearch)> {
        Edge::ALL.into_iter().map(move |edge| (edge, self.get(edge)))
    }

    pub fn all_found(&self) -> bool {
        self.iter().all(|(_, search)| search.point().is_some())
    }
}

/// Bounding box pulled inward by `margin` on every side
///
/// `None` when the margin consumes the box in either direction.
fn inset(bounds: &BoundingBox, margin: usize) -> Option<BoundingBox> {
    let inner = BoundingBox {
        top: bounds.top.checked_add(margin)?,
        bottom: bounds.bottom.checked_sub(margin)?,
        left: bounds.left.checked_add(margin)?,
        right: bounds.right.checked_sub(margin)?,
    };
    (inner.top <= inner.bottom && inner.left <= inner.right).then_some(inner)
}

/// First pixel holding the minimum nonzero reading among `pixels`
fn nearest(raw: &RawDepthMap, pixels: impl Iterator<Item = Pixel>) -> BorderSearch {
    let mut best: Option<BorderPoint> = None;
    for pixel in pixels {
        let depth = raw.at(pixel);
        if depth == RAW_DEPTH_INVALID || !depth.is_finite() {
            continue;
        }
        if best.is_none_or(|b| depth < b.depth) {
            best = Some(BorderPoint { pixel, depth });
        }
    }
    match best {
        Some(point) => BorderSearch::Found(point),
        None => BorderSearch::NotFound(BorderFailure::NoNonzeroDepth),
    }
}

/// Pick one border point per edge of `bounds`
pub fn select_border_points(raw: &RawDepthMap, bounds: &BoundingBox, margin: usize) -> BorderPoints {
    let Some(inner) = inset(bounds, margin) else {
        let empty = BorderSearch::NotFound(BorderFailure::EmptySegment);
        return BorderPoints {
            top: empty,
            bottom: empty,
            left: empty,
            right: empty,
        };
    };

    let along_row = |row: usize| (inner.left..=inner.right).map(move |col| Pixel::new(row, col));
    let along_col = |col: usize| (inner.top..=inner.bottom).map(move |row| Pixel::new(row, col));

    BorderPoints {
        top: nearest(raw, along_row(inner.top)),
        bottom: nearest(raw, along_row(inner.bottom)),
        left: nearest(raw, along_col(inner.left)),
        right: nearest(raw, along_col(inner.right)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_box(size: usize) -> BoundingBox {
        BoundingBox {
            top: 0,
            bottom: size - 1,
            left: 0,
            right: size - 1,
        }
    }

    #[test]
    fn test_picks_minimum_nonzero() {
        // Zeros are closer than anything but must be ignored
        let raw = RawDepthMap::from_fn(8, 8, |row, col| match (row, col) {
            (1, 2) => 0.0,
            (1, 5) => 700.0,
            _ => 900.0,
        });
        let points = select_border_points(&raw, &full_box(8), 1);
        let top = points.top.point().unwrap();
        assert_eq!(top.pixel, Pixel::new(1, 5));
        assert_eq!(top.depth, 700.0);
    }

    #[test]
    fn test_ties_take_first_in_scan_order() {
        let raw = RawDepthMap::uniform(6, 6, 1000.0);
        let points = select_border_points(&raw, &full_box(6), 0);
        assert_eq!(points.top.point().unwrap().pixel, Pixel::new(0, 0));
        assert_eq!(points.bottom.point().unwrap().pixel, Pixel::new(5, 0));
        assert_eq!(points.left.point().unwrap().pixel, Pixel::new(0, 0));
        assert_eq!(points.right.point().unwrap().pixel, Pixel::new(0, 5));
    }

    #[test]
    fn test_all_zero_segment_is_not_found() {
        let raw = RawDepthMap::from_fn(8, 8, |_, col| if col == 1 { 0.0 } else { 500.0 });
        let points = select_border_points(&raw, &full_box(8), 1);
        assert_eq!(
            points.left,
            BorderSearch::NotFound(BorderFailure::NoNonzeroDepth)
        );
        assert!(points.right.point().is_some());
        assert!(!points.all_found());
        assert_eq!(
            points.left.require(Edge::Left),
            Err(FrameError::NoValidBorderPoint {
                edge: Edge::Left,
                reason: BorderFailure::NoNonzeroDepth,
            })
        );
    }

    #[test]
    fn test_margin_consuming_box() {
        let raw = RawDepthMap::uniform(10, 10, 800.0);
        let bounds = BoundingBox {
            top: 3,
            bottom: 6,
            left: 3,
            right: 6,
        };
        let points = select_border_points(&raw, &bounds, 3);
        for (_, search) in points.iter() {
            assert_eq!(*search, BorderSearch::NotFound(BorderFailure::EmptySegment));
        }
    }

    #[test]
    fn test_margin_larger_than_index() {
        let raw = RawDepthMap::uniform(4, 4, 800.0);
        let bounds = BoundingBox {
            top: 0,
            bottom: 1,
            left: 0,
            right: 1,
        };
        let points = select_border_points(&raw, &bounds, 3);
        assert!(!points.all_found());
    }

    #[test]
    fn test_huge_margin_is_empty_segment() {
        let raw = RawDepthMap::uniform(4, 4, 800.0);
        let bounds = BoundingBox {
            top: 1,
            bottom: 2,
            left: 1,
            right: 2,
        };
        let points = select_border_points(&raw, &bounds, usize::MAX);
        for (_, search) in points.iter() {
            assert_eq!(*search, BorderSearch::NotFound(BorderFailure::EmptySegment));
        }
    }

    #[test]
    fn test_edge_names() {
        assert_eq!(Edge::Top.to_string(), "top");
        assert_eq!(Edge::ALL.len(), 4);
    }
}
