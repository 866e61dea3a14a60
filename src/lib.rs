// SPDX-License-Identifier: GPL-3.0-only

//! Body shape features from single depth-camera captures
//!
//! Given an 8-bit depth frame (background = 255) and the aligned raw depth
//! readings, this crate estimates a subject's height and width and builds a
//! fixed-length sideview shape descriptor for downstream modeling.
//!
//! # Architecture
//!
//! - [`measure`]: silhouette bounds, border points, pinhole projection, height/width
//! - [`profile`]: per-row sideview profile and fixed-length resampling
//! - [`pipeline`]: per-frame orchestration with independent failure of each output
//! - [`dataset`]: directory layout, loaders, batch driver and output writers
//! - [`config`]: pipeline and output configuration
//!
//! # Example
//!
//! ```
//! use bodyshape::config::PipelineConfig;
//! use bodyshape::frame::{DepthFrame, RawDepthMap};
//! use bodyshape::pipeline::FramePipeline;
//!
//! let frame = DepthFrame::from_fn(64, 48, |row, col| {
//!     if (8..40).contains(&row) && (20..44).contains(&col) { 120 } else { 255 }
//! });
//! let raw = RawDepthMap::uniform(64, 48, 2000.0);
//!
//! let pipeline = FramePipeline::new(PipelineConfig::default()).unwrap();
//! let analysis = pipeline.analyze(&frame, &raw).unwrap();
//! let measurement = analysis.measurement.unwrap();
//! assert!(measurement.height > measurement.width);
//! assert_eq!(analysis.sideview.unwrap().len(), 200);
//! ```

pub mod config;
pub mod constants;
pub mod dataset;
pub mod errors;
pub mod frame;
pub mod measure;
pub mod pipeline;
pub mod profile;

// Re-export commonly used types
pub use config::Config;
pub use errors::{DatasetError, FrameError};
pub use frame::{DepthFrame, RawDepthMap};
pub use measure::{Measurement, Point3D};
pub use pipeline::{FrameAnalysis, FramePipeline};
pub use profile::SideviewDescriptor;
