// SPDX-License-Identifier: GPL-3.0-only

//! Loaders for depth frames and raw depth text grids

use crate::config::PipelineConfig;
use crate::errors::{FrameError, FrameResult};
use crate::frame::{DepthFrame, RawDepthMap};
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Load an 8-bit depth frame, converting any decodable image to luma
///
/// The frame must match the configured capture size.
pub fn load_depth_frame(path: &Path, config: &PipelineConfig) -> FrameResult<DepthFrame> {
    let image = image::open(path).map_err(|e| match e {
        image::ImageError::IoError(io) if io.kind() == ErrorKind::NotFound => {
            FrameError::FrameNotFound {
                path: path.to_path_buf(),
            }
        }
        other => FrameError::UnreadableImage {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    })?;

    let gray = image.to_luma8();
    let found = (gray.width() as usize, gray.height() as usize);
    let expected = (config.frame_width, config.frame_height);
    if found != expected {
        return Err(FrameError::DimensionMismatch { expected, found });
    }

    debug!(path = %path.display(), width = found.0, height = found.1, "Depth frame loaded");
    Ok(DepthFrame::from_gray_image(&gray, config.background))
}

/// Load a raw depth grid of exactly `width` x `height` values
pub fn load_raw_depth(path: &Path, width: usize, height: usize) -> FrameResult<RawDepthMap> {
    // Missing and unopenable files are "not found"; bad content is malformed
    let bytes = std::fs::read(path).map_err(|_| FrameError::FrameNotFound {
        path: path.to_path_buf(),
    })?;
    let text = String::from_utf8(bytes).map_err(|e| {
        let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
        FrameError::MalformedRawDepth {
            path: path.to_path_buf(),
            line: valid.iter().filter(|&&b| b == b'\n').count() + 1,
            reason: e.utf8_error().to_string(),
        }
    })?;
    let map = parse_raw_depth(&text, width, height, path)?;
    debug!(path = %path.display(), "Raw depth loaded");
    Ok(map)
}

/// Parse a raw depth grid: one row per line, values split on tabs/whitespace
///
/// Blank lines are ignored. `path` is only used in error reports.
pub fn parse_raw_depth(
    text: &str,
    width: usize,
    height: usize,
    path: &Path,
) -> FrameResult<RawDepthMap> {
    let malformed = |line: usize, reason: String| FrameError::MalformedRawDepth {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let mut data = Vec::with_capacity(width * height);
    let mut rows = 0;
    let mut last_line = 0;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        if rows == height {
            return Err(malformed(line_no, format!("more than {} rows", height)));
        }

        let start = data.len();
        for token in line.split_whitespace() {
            let value: f64 = token
                .parse()
                .map_err(|_| malformed(line_no, format!("invalid value '{}'", token)))?;
            data.push(value);
        }
        let count = data.len() - start;
        if count != width {
            return Err(malformed(
                line_no,
                format!("expected {} values, found {}", width, count),
            ));
        }

        rows += 1;
        last_line = line_no;
    }

    if rows != height {
        return Err(malformed(
            last_line,
            format!("expected {} rows, found {}", height, rows),
        ));
    }

    RawDepthMap::new(width, height, data)
}
