// SPDX-License-Identifier: GPL-3.0-only

//! Pipeline-wide defaults
//!
//! Every value here is only a default: [`crate::config::PipelineConfig`]
//! carries the effective values so a pipeline can be retargeted to another
//! camera or resolution without touching these.

/// 8-bit depth visualization value marking "no subject"
pub const BACKGROUND: u8 = 255;

/// Raw depth reading marking an invalid/unmeasured pixel
pub const RAW_DEPTH_INVALID: f64 = 0.0;

/// Inward margin (pixels) applied to every bound before border search
pub const DEFAULT_BORDER_MARGIN: usize = 3;

/// Number of values in a sideview descriptor
pub const SIDEVIEW_DESCRIPTOR_LEN: usize = 200;

/// Default capture width (pixels)
pub const DEFAULT_FRAME_WIDTH: usize = 640;
/// Default capture height (pixels)
pub const DEFAULT_FRAME_HEIGHT: usize = 480;

/// Smallest divisor accepted when normalizing a sideview profile
pub const NORMALIZATION_EPSILON: f64 = f64::EPSILON;

/// Kinect v1 depth camera intrinsics
///
/// Calibrated for the 640x480 depth stream the datasets were captured with.
/// Used for unprojecting border pixels into camera space.
pub mod kinect {
    /// Focal length X (pixels)
    pub const FX: f64 = 5.942_143_421_192_324_7e2;
    /// Focal length Y (pixels)
    pub const FY: f64 = 5.910_405_369_687_077_8e2;
    /// Principal point X (pixels)
    pub const CX: f64 = 3.393_078_097_530_031_4e2;
    /// Principal point Y (pixels)
    pub const CY: f64 = 2.427_391_376_175_161_5e2;
}

/// Default dataset sub-directory holding 8-bit depth frames
pub const DEPTH_DIR: &str = "depth";
/// Default dataset sub-directory holding color frames
pub const COLOR_DIR: &str = "color";
/// Default dataset sub-directory holding raw depth text grids
pub const RAW_DEPTH_DIR: &str = "raw_depth";
/// Extension of raw depth text grids
pub const RAW_DEPTH_EXTENSION: &str = "txt";

/// Default feature-vector output file
pub const DEFAULT_FEATURES_FILE: &str = "features.txt";
/// Default per-frame diagnostics output file
pub const DEFAULT_MEASUREMENTS_FILE: &str = "heightwidth.txt";

/// Application name used for the configuration directory
pub const APP_NAME: &str = "bodyshape";
/// Configuration file name inside the configuration directory
pub const CONFIG_FILE_NAME: &str = "config.json";
