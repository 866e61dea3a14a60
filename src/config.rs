// SPDX-License-Identifier: GPL-3.0-only

use crate::constants::{
    APP_NAME, BACKGROUND, COLOR_DIR, CONFIG_FILE_NAME, DEFAULT_BORDER_MARGIN,
    DEFAULT_FEATURES_FILE, DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH, DEFAULT_MEASUREMENTS_FILE,
    DEPTH_DIR, RAW_DEPTH_DIR, SIDEVIEW_DESCRIPTOR_LEN,
};
use crate::errors::{DatasetError, DatasetResult};
use crate::measure::CameraIntrinsics;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Portion of the per-row profile used as resampling input
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileSpan {
    /// First half of the rows (head to mid-body), matching descriptors
    /// produced by earlier feature sets
    #[default]
    FirstHalf,
    /// Every row from top to bottom
    Full,
}

/// What to do with a profile row that has no foreground pixel
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPolicy {
    /// Mark the frame's profile invalid
    #[default]
    Reject,
    /// Drop the row and keep going
    Skip,
}

/// Settings for single-frame analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Depth camera intrinsics used for unprojection
    pub intrinsics: CameraIntrinsics,
    /// Expected frame width in pixels
    pub frame_width: usize,
    /// Expected frame height in pixels
    pub frame_height: usize,
    /// Depth frame value marking background; frames must carry the same value
    pub background: u8,
    /// Inward margin applied to the bounding box before border search
    pub border_margin: usize,
    /// Number of values in the sideview descriptor
    pub descriptor_len: usize,
    /// Rows fed to resampling
    pub profile_span: ProfileSpan,
    /// Handling of empty rows inside the vertical extent
    pub gap_policy: GapPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            intrinsics: CameraIntrinsics::default(),
            frame_width: DEFAULT_FRAME_WIDTH,
            frame_height: DEFAULT_FRAME_HEIGHT,
            background: BACKGROUND,
            border_margin: DEFAULT_BORDER_MARGIN,
            descriptor_len: SIDEVIEW_DESCRIPTOR_LEN,
            profile_span: ProfileSpan::default(),
            gap_policy: GapPolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// Check values that would make analysis meaningless
    pub fn validate(&self) -> DatasetResult<()> {
        let CameraIntrinsics { fx, fy, cx, cy } = self.intrinsics;
        if !(fx.is_finite() && fx > 0.0 && fy.is_finite() && fy > 0.0) {
            return Err(DatasetError::Config(format!(
                "focal lengths must be positive (fx={}, fy={})",
                fx, fy
            )));
        }
        if !(cx.is_finite() && cy.is_finite()) {
            return Err(DatasetError::Config(format!(
                "principal point must be finite (cx={}, cy={})",
                cx, cy
            )));
        }
        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(DatasetError::Config(format!(
                "frame size must be non-zero ({}x{})",
                self.frame_width, self.frame_height
            )));
        }
        if self.descriptor_len == 0 {
            return Err(DatasetError::Config(
                "descriptor length must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Dataset layout and output file names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Sub-directory with 8-bit depth frames
    pub depth_dir: String,
    /// Sub-directory with color frames
    pub color_dir: String,
    /// Sub-directory with raw depth text grids
    pub raw_depth_dir: String,
    /// Feature-vector output file
    pub features_file: PathBuf,
    /// Per-frame diagnostics output file
    pub measurements_file: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            depth_dir: DEPTH_DIR.to_string(),
            color_dir: COLOR_DIR.to_string(),
            raw_depth_dir: RAW_DEPTH_DIR.to_string(),
            features_file: PathBuf::from(DEFAULT_FEATURES_FILE),
            measurements_file: PathBuf::from(DEFAULT_MEASUREMENTS_FILE),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Frame analysis settings
    pub pipeline: PipelineConfig,
    /// Dataset layout and outputs
    pub output: OutputConfig,
}

impl Config {
    /// Read a JSON configuration file; missing keys take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> DatasetResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&content)?;
        config.pipeline.validate()?;
        Ok(config)
    }

    /// Per-user configuration file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load `explicit` if given, else the per-user file if it exists, else defaults
    pub fn load_or_default(explicit: Option<&Path>) -> DatasetResult<Self> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "Loading configuration");
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => {
                debug!(path = %path.display(), "Loading user configuration");
                Self::load(path)
            }
            _ => Ok(Self::default()),
        }
    }
}
