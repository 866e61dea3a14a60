// SPDX-License-Identifier: GPL-3.0-only

//! Sideview shape descriptor
//!
//! Summarizes how prominent the silhouette is on each row between the top
//! and bottom of the bounding box:
//! 1. Mean foreground value per row
//! 2. Inverted against the background value (closer = larger)
//! 3. Divided by the smallest inverted value
//! 4. Optionally cut to the first half of the rows
//! 5. Resampled to a fixed length (see [`resample`])

pub mod resample;

use crate::config::{GapPolicy, PipelineConfig, ProfileSpan};
use crate::constants::NORMALIZATION_EPSILON;
use crate::errors::{FrameError, FrameResult};
use crate::frame::DepthFrame;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Fixed-length resampled sideview profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SideviewDescriptor(Vec<f64>);

impl SideviewDescriptor {
    pub fn from_values(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_values(self) -> Vec<f64> {
        self.0
    }
}

/// Mean foreground value of each row in `top..=bottom`
///
/// Empty rows are rejected or dropped depending on `gap_policy`.
pub fn row_means(
    frame: &DepthFrame,
    top: usize,
    bottom: usize,
    gap_policy: GapPolicy,
) -> FrameResult<Vec<f64>> {
    let mut means = Vec::with_capacity(bottom.saturating_sub(top) + 1);
    for row in top..=bottom {
        let (sum, count) = frame
            .row(row)
            .iter()
            .filter(|&&value| value != frame.background())
            .fold((0u64, 0u64), |(sum, count), &value| {
                (sum + value as u64, count + 1)
            });

        if count == 0 {
            match gap_policy {
                GapPolicy::Reject => return Err(FrameError::DegenerateProfileRow { row }),
                GapPolicy::Skip => {
                    warn!(row, "Skipping profile row with no foreground pixels");
                    continue;
                }
            }
        }
        means.push(sum as f64 / count as f64);
    }
    Ok(means)
}

/// Invert row means against `background` and scale so the minimum is 1.0
///
/// The inverted value is the distance from the background, so a dark
/// background (e.g. 0) works the same as the usual 255.
pub fn normalize(means: &[f64], background: u8) -> FrameResult<Vec<f64>> {
    let inverted: Vec<f64> = means
        .iter()
        .map(|m| (background as f64 - m).abs())
        .collect();
    let min = inverted.iter().copied().fold(f64::INFINITY, f64::min);
    if !min.is_finite() {
        return Err(FrameError::ProfileTooShort { len: 0 });
    }
    if min <= NORMALIZATION_EPSILON {
        return Err(FrameError::ZeroNormalizationDivisor);
    }
    Ok(inverted.into_iter().map(|v| v / min).collect())
}

/// Builds sideview descriptors with a fixed configuration
#[derive(Debug, Clone)]
pub struct SideviewProfiler {
    background: u8,
    descriptor_len: usize,
    span: ProfileSpan,
    gap_policy: GapPolicy,
}

impl SideviewProfiler {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            background: config.background,
            descriptor_len: config.descriptor_len,
            span: config.profile_span,
            gap_policy: config.gap_policy,
        }
    }

    /// Descriptor for the rows `top..=bottom` of `frame`
    ///
    /// `top`/`bottom` are the raw bounding-box rows, not the inset ones.
    pub fn profile(
        &self,
        frame: &DepthFrame,
        top: usize,
        bottom: usize,
    ) -> FrameResult<SideviewDescriptor> {
        let means = row_means(frame, top, bottom, self.gap_policy)?;
        let normalized = normalize(&means, self.background)?;

        let samples = match self.span {
            ProfileSpan::FirstHalf => &normalized[..normalized.len() / 2],
            ProfileSpan::Full => &normalized[..],
        };
        if samples.is_empty() {
            return Err(FrameError::ProfileTooShort { len: normalized.len() });
        }

        debug!(
            rows = means.len(),
            samples = samples.len(),
            target = self.descriptor_len,
            "Resampling sideview profile"
        );
        let values = resample::resample(samples, self.descriptor_len)?;
        Ok(SideviewDescriptor(values))
    }
}
