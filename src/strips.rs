//! Column-strip partitioning for the neighborhood filters.
//!
//! An image `width` pixels wide is cut into `n` strips of `width / n`
//! columns. Each strip is copied into its own [`Image`] and filtered as a
//! single task on a pool of exactly `n` threads, so every strip can run
//! at once. Rayon may still run two strip tasks back to back on one
//! thread if a strip finishes early; results do not depend on placement.
//! Strips are copied back in strip order once every task has finished. Filters that look at neighbors (box
//! blur) therefore see each strip's edge as an image edge.

use alloc::vec::Vec;

use enough::Stop;

use crate::error::BitmapError;
use crate::filters::{box_blur, swiss_cheese_tint};
use crate::image::Image;

/// Strip count used when none is configured.
pub const DEFAULT_STRIPS: usize = 4;

/// A filter that runs independently on each strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StripOp {
    /// [`box_blur`].
    BoxBlur,
    /// [`swiss_cheese_tint`].
    SwissCheeseTint,
}

impl StripOp {
    fn apply(self, image: &mut Image, stop: &dyn Stop) -> Result<(), BitmapError> {
        match self {
            StripOp::BoxBlur => box_blur(image, stop),
            StripOp::SwissCheeseTint => swiss_cheese_tint(image, stop),
        }
    }
}

/// One vertical slice of an image, owned by a single worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Strip {
    /// Position left to right, starting at 0.
    pub index: usize,
    /// First column of the source image covered by this strip.
    pub x_offset: u32,
    pub image: Image,
}

/// Splits images into equal-width column strips and runs [`StripOp`]s on
/// them in parallel, one task per strip on an `n`-thread pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StripPartitioner {
    strips: usize,
}

impl Default for StripPartitioner {
    fn default() -> Self {
        Self::new(DEFAULT_STRIPS)
    }
}

impl StripPartitioner {
    pub fn new(strips: usize) -> Self {
        Self { strips }
    }

    pub fn strips(&self) -> usize {
        self.strips
    }

    /// Width of each strip for an image `width` pixels wide.
    ///
    /// Fails with `InvalidPartition` unless `1 <= strips <= width` and
    /// `strips` divides `width`.
    pub fn strip_width(&self, width: u32) -> Result<u32, BitmapError> {
        let n = self.strips;
        let fits = n != 0 && n <= width as usize && width as usize % n == 0;
        if !fits {
            return Err(BitmapError::InvalidPartition {
                width,
                strips: n,
            });
        }
        Ok(width / n as u32)
    }

    /// Copy `image` into owned strips, left to right.
    pub fn split(&self, image: &Image) -> Result<Vec<Strip>, BitmapError> {
        let strip_width = self.strip_width(image.width())?;
        let sw = strip_width as usize;
        let mut strips = Vec::with_capacity(self.strips);
        for index in 0..self.strips {
            let x0 = index * sw;
            let mut pixels = Vec::with_capacity(sw * image.height() as usize);
            for row in image.rows() {
                pixels.extend_from_slice(&row[x0..x0 + sw]);
            }
            strips.push(Strip {
                index,
                x_offset: x0 as u32,
                image: Image::new(pixels, strip_width, image.height())?,
            });
        }
        Ok(strips)
    }

    /// Copy strips back into their columns of `image`. Strip `k` must be
    /// at position `k` and match the geometry `split` produced.
    pub fn merge(&self, image: &mut Image, strips: &[Strip]) -> Result<(), BitmapError> {
        let strip_width = self.strip_width(image.width())?;
        if strips.len() != self.strips {
            return Err(BitmapError::StripMismatch(alloc::format!(
                "expected {} strips, got {}",
                self.strips,
                strips.len()
            )));
        }
        for (k, strip) in strips.iter().enumerate() {
            let geometry = (strip.image.width(), strip.image.height());
            let x_offset = k as u32 * strip_width;
            if strip.index != k || strip.x_offset != x_offset {
                return Err(BitmapError::StripMismatch(alloc::format!(
                    "strip {} at column {} found at position {k}, expected column {x_offset}",
                    strip.index,
                    strip.x_offset
                )));
            }
            if geometry != (strip_width, image.height()) {
                return Err(BitmapError::StripMismatch(alloc::format!(
                    "strip {k} is {}x{}, expected {strip_width}x{}",
                    geometry.0,
                    geometry.1,
                    image.height()
                )));
            }
        }

        let sw = strip_width as usize;
        for y in 0..image.height() as usize {
            let row = image.row_mut(y);
            for strip in strips {
                let x0 = strip.x_offset as usize;
                row[x0..x0 + sw].copy_from_slice(strip.image.row(y));
            }
        }
        Ok(())
    }

    /// Split, run each op over all strips in parallel (one join per op),
    /// then merge. The image is only written after every op has finished
    /// on every strip.
    pub fn run(
        &self,
        image: &mut Image,
        ops: &[StripOp],
        stop: &(dyn Stop + Sync),
    ) -> Result<(), BitmapError> {
        if ops.is_empty() {
            return Ok(());
        }
        let mut strips = self.split(image)?;
        log::debug!(
            "split {}x{} image into {} strips of width {}",
            image.width(),
            image.height(),
            self.strips,
            image.width() / self.strips as u32
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.strips)
            .thread_name(|i| alloc::format!("strip-worker-{i}"))
            .build()?;

        let mut results: Vec<Result<(), BitmapError>> = Vec::new();
        for &op in ops {
            log::debug!("running {op:?} on {} strips", strips.len());
            results.clear();
            results.resize_with(strips.len(), || Ok(()));
            let tasks = strips.iter_mut().zip(results.iter_mut());
            pool.scope(move |s| {
                for (strip, result) in tasks {
                    s.spawn(move |_| {
                        *result = stop
                            .check()
                            .map_err(BitmapError::from)
                            .and_then(|()| op.apply(&mut strip.image, stop));
                    });
                }
            });
            results.drain(..).collect::<Result<(), _>>()?;
        }

        self.merge(image, &strips)
    }
}
