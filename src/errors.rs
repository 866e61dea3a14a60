// SPDX-License-Identifier: GPL-3.0-only

//! Error types for frame analysis and dataset processing

use crate::measure::border::Edge;
use std::fmt;
use std::path::PathBuf;

/// Result type alias for per-frame operations
pub type FrameResult<T> = Result<T, FrameError>;

/// Result type alias for dataset-level operations
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Why a border edge has no usable point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderFailure {
    /// The inset margin left no pixels to scan on this edge
    EmptySegment,
    /// Every raw depth reading along the segment is zero
    NoNonzeroDepth,
}

/// Errors local to a single frame
///
/// None of these abort a batch; the driver records them and moves on.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameError {
    /// Depth frame or raw depth file could not be located or opened
    FrameNotFound { path: PathBuf },
    /// Depth frame exists but could not be decoded as an image
    UnreadableImage { path: PathBuf, reason: String },
    /// Raw depth text grid has the wrong shape or a non-numeric value
    MalformedRawDepth {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    /// Depth frame and raw depth map (or configured size) disagree
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// Row-major buffer does not hold `width * height` values
    BufferLength { expected: usize, found: usize },
    /// Depth frame uses a different background value than the pipeline
    BackgroundMismatch { expected: u8, found: u8 },
    /// Depth frame contains no foreground pixel
    NoSilhouetteDetected,
    /// One bounding-box edge has no valid border point
    NoValidBorderPoint { edge: Edge, reason: BorderFailure },
    /// A row inside the vertical extent has no foreground pixel
    DegenerateProfileRow { row: usize },
    /// Sideview profile minimum is zero, normalization undefined
    ZeroNormalizationDivisor,
    /// Nothing left to resample
    ProfileTooShort { len: usize },
}

/// Errors that stop a whole dataset run
#[derive(Debug)]
pub enum DatasetError {
    /// Expected dataset sub-directory is missing
    MissingDirectory(PathBuf),
    /// Filesystem error while scanning or writing
    Io(std::io::Error),
    /// Configuration could not be read or is invalid
    Config(String),
    /// Batch worker failed outside of frame analysis
    Worker(String),
}

impl fmt::Display for BorderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BorderFailure::EmptySegment => write!(f, "margin leaves an empty scan segment"),
            BorderFailure::NoNonzeroDepth => write!(f, "no nonzero raw depth on segment"),
        }
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::FrameNotFound { path } => {
                write!(f, "Frame not found: {}", path.display())
            }
            FrameError::UnreadableImage { path, reason } => {
                write!(f, "Unreadable image {}: {}", path.display(), reason)
            }
            FrameError::MalformedRawDepth { path, line, reason } => write!(
                f,
                "Malformed raw depth {} (line {}): {}",
                path.display(),
                line,
                reason
            ),
            FrameError::DimensionMismatch { expected, found } => write!(
                f,
                "Dimension mismatch: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            FrameError::BufferLength { expected, found } => write!(
                f,
                "Buffer length mismatch: expected {} values, found {}",
                expected, found
            ),
            FrameError::BackgroundMismatch { expected, found } => write!(
                f,
                "Background mismatch: pipeline uses {}, frame uses {}",
                expected, found
            ),
            FrameError::NoSilhouetteDetected => write!(f, "No silhouette detected"),
            FrameError::NoValidBorderPoint { edge, reason } => {
                write!(f, "No valid {} border point: {}", edge, reason)
            }
            FrameError::DegenerateProfileRow { row } => {
                write!(f, "Profile row {} has no foreground pixels", row)
            }
            FrameError::ZeroNormalizationDivisor => {
                write!(f, "Sideview profile minimum is zero")
            }
            FrameError::ProfileTooShort { len } => {
                write!(f, "Sideview profile too short to resample ({} rows)", len)
            }
        }
    }
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::MissingDirectory(path) => {
                write!(f, "Missing dataset directory: {}", path.display())
            }
            DatasetError::Io(e) => write!(f, "I/O error: {}", e),
            DatasetError::Config(msg) => write!(f, "Configuration error: {}", msg),
            DatasetError::Worker(msg) => write!(f, "Worker error: {}", msg),
        }
    }
}

impl std::error::Error for BorderFailure {}
impl std::error::Error for FrameError {}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        DatasetError::Io(err)
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(err: serde_json::Error) -> Self {
        DatasetError::Config(err.to_string())
    }
}

impl From<tokio::task::JoinError> for DatasetError {
    fn from(err: tokio::task::JoinError) -> Self {
        DatasetError::Worker(err.to_string())
    }
}
