//! Owned pixel grid.
//!
//! Pixels live in one contiguous `Vec` addressed by row stride. The stride
//! is normally the width; an in-place shrink keeps the old stride and only
//! narrows the logical width and height.

use alloc::vec::Vec;

use crate::error::BitmapError;
use crate::pixel::Pixel;

/// A width × height grid of [`Pixel`]s, row 0 first.
///
/// Equality compares size and visible pixels only, not storage.
#[derive(Clone, Debug)]
pub struct Image {
    pixels: Vec<Pixel>,
    width: u32,
    height: u32,
    stride: usize,
}

impl Image {
    /// Adopt an existing row-major grid of exactly `width * height` pixels.
    pub fn new(pixels: Vec<Pixel>, width: u32, height: u32) -> Result<Self, BitmapError> {
        let needed = pixel_count(width, height)?;
        if pixels.len() != needed {
            return Err(BitmapError::BufferSizeMismatch {
                needed,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
            stride: width as usize,
        })
    }

    /// An image with every pixel set to `fill`.
    pub fn filled(width: u32, height: u32, fill: Pixel) -> Result<Self, BitmapError> {
        let needed = pixel_count(width, height)?;
        Ok(Self {
            pixels: alloc::vec![fill; needed],
            width,
            height,
            stride: width as usize,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixel at (`row`, `col`).
    pub fn get(&self, row: usize, col: usize) -> Result<Pixel, BitmapError> {
        let idx = self.index(row, col)?;
        Ok(self.pixels[idx])
    }

    /// Mutable access to the pixel at (`row`, `col`).
    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut Pixel, BitmapError> {
        let idx = self.index(row, col)?;
        Ok(&mut self.pixels[idx])
    }

    /// Overwrite the pixel at (`row`, `col`).
    pub fn set(&mut self, row: usize, col: usize, px: Pixel) -> Result<(), BitmapError> {
        *self.get_mut(row, col)? = px;
        Ok(())
    }

    /// One scan line, `width` pixels long.
    ///
    /// Panics if `row >= height`; filters iterate within bounds.
    pub fn row(&self, row: usize) -> &[Pixel] {
        assert!(row < self.height as usize, "row {row} out of range");
        let start = row * self.stride;
        &self.pixels[start..start + self.width as usize]
    }

    /// Mutable scan line, `width` pixels long.
    pub fn row_mut(&mut self, row: usize) -> &mut [Pixel] {
        assert!(row < self.height as usize, "row {row} out of range");
        let start = row * self.stride;
        let width = self.width as usize;
        &mut self.pixels[start..start + width]
    }

    /// Iterate scan lines top to bottom. An empty image has no lines,
    /// whatever its height.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> + '_ {
        (0..self.visible_rows()).map(move |y| self.row(y))
    }

    /// Iterate scan lines mutably, top to bottom.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [Pixel]> + '_ {
        let width = self.width as usize;
        let rows = self.visible_rows();
        self.pixels
            .chunks_mut(self.stride.max(1))
            .take(rows)
            .map(move |row| &mut row[..width])
    }

    fn visible_rows(&self) -> usize {
        if self.is_empty() { 0 } else { self.height as usize }
    }

    /// Copy out the logical pixels as a tightly packed row-major `Vec`.
    pub fn to_vec(&self) -> Vec<Pixel> {
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize);
        for row in self.rows() {
            out.extend_from_slice(row);
        }
        out
    }

    /// Backing store and stride, for in-place resampling.
    pub(crate) fn raw_mut(&mut self) -> (&mut [Pixel], usize) {
        (&mut self.pixels, self.stride)
    }

    /// Narrow the logical size without touching storage.
    pub(crate) fn shrink_to(&mut self, width: u32, height: u32) {
        debug_assert!(width <= self.width && height <= self.height);
        self.width = width;
        self.height = height;
    }

    /// Replace storage and size together.
    pub(crate) fn replace(&mut self, other: Image) {
        *self = other;
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, BitmapError> {
        if row >= self.height as usize || col >= self.width as usize {
            return Err(BitmapError::OutOfBounds {
                row,
                col,
                width: self.width,
                height: self.height,
            });
        }
        Ok(row * self.stride + col)
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.rows().eq(other.rows())
    }
}

impl Eq for Image {}

pub(crate) fn pixel_count(width: u32, height: u32) -> Result<usize, BitmapError> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(BitmapError::DimensionsTooLarge {
            width: width.into(),
            height: height.into(),
        })
}
