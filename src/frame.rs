// SPDX-License-Identifier: GPL-3.0-only

//! Depth frame and raw depth map grids
//!
//! Both grids are row-major and immutable once built. A [`DepthFrame`] is the
//! 8-bit visualization the silhouette is found in; a [`RawDepthMap`] holds
//! the physical readings used for projection. They must share dimensions.

use crate::constants::BACKGROUND;
use crate::errors::{FrameError, FrameResult};
use image::GrayImage;
use serde::{Deserialize, Serialize};

/// A pixel location as (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pixel {
    pub row: usize,
    pub col: usize,
}

impl Pixel {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// 8-bit depth visualization; `background` marks "no subject"
#[derive(Debug, Clone, PartialEq)]
pub struct DepthFrame {
    width: usize,
    height: usize,
    background: u8,
    data: Vec<u8>,
}

impl DepthFrame {
    /// Build a frame from row-major data using the standard background value
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> FrameResult<Self> {
        Self::with_background(width, height, data, BACKGROUND)
    }

    pub fn with_background(
        width: usize,
        height: usize,
        data: Vec<u8>,
        background: u8,
    ) -> FrameResult<Self> {
        if data.len() != width * height {
            return Err(FrameError::BufferLength {
                expected: width * height,
                found: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            background,
            data,
        })
    }

    /// Frame of all-background pixels
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            background: BACKGROUND,
            data: vec![BACKGROUND; width * height],
        }
    }

    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> u8) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                data.push(f(row, col));
            }
        }
        Self {
            width,
            height,
            background: BACKGROUND,
            data,
        }
    }

    /// Convert a decoded luma image, keeping its exact pixel values
    pub fn from_gray_image(image: &GrayImage, background: u8) -> Self {
        Self {
            width: image.width() as usize,
            height: image.height() as usize,
            background,
            data: image.as_raw().clone(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn background(&self) -> u8 {
        self.background
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.data[row * self.width + col]
    }

    #[inline]
    pub fn is_foreground(&self, row: usize, col: usize) -> bool {
        self.get(row, col) != self.background
    }

    pub fn row(&self, row: usize) -> &[u8] {
        let start = row * self.width;
        &self.data[start..start + self.width]
    }
}

/// Physical depth readings aligned with a [`DepthFrame`]; 0 is invalid
#[derive(Debug, Clone, PartialEq)]
pub struct RawDepthMap {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl RawDepthMap {
    pub fn new(width: usize, height: usize, data: Vec<f64>) -> FrameResult<Self> {
        if data.len() != width * height {
            return Err(FrameError::BufferLength {
                expected: width * height,
                found: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Map with the same reading everywhere
    pub fn uniform(width: usize, height: usize, depth: f64) -> Self {
        Self {
            width,
            height,
            data: vec![depth; width * height],
        }
    }

    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                data.push(f(row, col));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.width + col]
    }

    #[inline]
    pub fn at(&self, pixel: Pixel) -> f64 {
        self.get(pixel.row, pixel.col)
    }

    /// Ensure this map lines up with `frame`
    pub fn check_aligned(&self, frame: &DepthFrame) -> FrameResult<()> {
        if self.width != frame.width() || self.height != frame.height() {
            return Err(FrameError::DimensionMismatch {
                expected: (frame.width(), frame.height()),
                found: (self.width, self.height),
            });
        }
        Ok(())
    }
}
