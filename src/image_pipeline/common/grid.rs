//! Owned RGB pixel container

use std::ops::{Index, IndexMut};

use crate::image_pipeline::common::error::{PipelineError, Result};

/// A single 8-bit-per-channel RGB pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Same value in all three channels
    pub const fn grey(value: u8) -> Self {
        Self { r: value, g: value, b: value }
    }
}

/// Rectangular row-major RGB buffer. Row 0 is the visual top row.
///
/// Both dimensions are always non-zero and `pixels.len() == width * height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl PixelGrid {
    /// Creates a grid filled with a single color.
    pub fn new(width: usize, height: usize, fill: Rgb) -> Result<Self> {
        let len = Self::checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![fill; len],
        })
    }

    /// Wraps an existing row-major pixel buffer.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self> {
        let len = Self::checked_len(width, height)?;
        if pixels.len() != len {
            return Err(PipelineError::InvalidArgumentError(format!(
                "pixel buffer holds {} pixels, {}x{} needs {}",
                pixels.len(),
                width,
                height,
                len
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    fn checked_len(width: usize, height: usize) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidArgumentError(format!(
                "grid dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        width.checked_mul(height).ok_or_else(|| {
            PipelineError::InvalidArgumentError(format!(
                "grid dimensions {}x{} overflow",
                width, height
            ))
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of pixels. Never zero.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Always `false` for a grid built through `new` or `from_pixels`.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Rgb> {
        if row < self.height && col < self.width {
            Some(self.pixels[row * self.width + col])
        } else {
            None
        }
    }

    /// Overwrites one pixel, returning `false` when `(row, col)` is outside the grid.
    pub fn set(&mut self, row: usize, col: usize, value: Rgb) -> bool {
        if row < self.height && col < self.width {
            self.pixels[row * self.width + col] = value;
            true
        } else {
            false
        }
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Iterates rows from the visual top down.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[Rgb]> + ExactSizeIterator {
        self.pixels.chunks_exact(self.width)
    }

    /// Builds a new grid of the same shape by applying `f` to every pixel.
    pub fn map<F>(&self, f: F) -> PixelGrid
    where
        F: Fn(Rgb) -> Rgb,
    {
        PixelGrid {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|&p| f(p)).collect(),
        }
    }
}

impl Index<(usize, usize)> for PixelGrid {
    type Output = Rgb;

    fn index(&self, (row, col): (usize, usize)) -> &Rgb {
        assert!(
            row < self.height && col < self.width,
            "pixel ({}, {}) out of bounds for {}x{} grid",
            row,
            col,
            self.width,
            self.height
        );
        &self.pixels[row * self.width + col]
    }
}

impl IndexMut<(usize, usize)> for PixelGrid {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Rgb {
        assert!(
            row < self.height && col < self.width,
            "pixel ({}, {}) out of bounds for {}x{} grid",
            row,
            col,
            self.width,
            self.height
        );
        &mut self.pixels[row * self.width + col]
    }
}
