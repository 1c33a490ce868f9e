use alloc::vec::Vec;
use std::time::{SystemTime, UNIX_EPOCH};

use enough::Stop;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::bitmap::Bitmap;
use crate::bmp::{FileHeader, FormatHeader};
use crate::error::BitmapError;
use crate::filters::{self, ColorShift};
use crate::image::Image;
use crate::strips::{DEFAULT_STRIPS, StripOp, StripPartitioner};

/// The set of filters to run on one image, and how.
///
/// Filters run in a fixed order regardless of the order the builder
/// methods are called: grayscale, color shift, resize, then the strip
/// filters (swiss-cheese tint before box blur), then swiss-cheese holes.
///
/// ```no_run
/// use bmpfilters::{ColorShift, ProcessRequest, Unstoppable, decode_bmp};
///
/// let data: &[u8] = &[]; // your BMP bytes
/// let mut bitmap = decode_bmp(data, Unstoppable)?;
/// ProcessRequest::new()
///     .color_shift(ColorShift::new(0, 0, -100))
///     .resize(0.5)
///     .box_blur()
///     .process(&mut bitmap, Unstoppable)?;
/// let out = bitmap.encode(Unstoppable)?;
/// # Ok::<(), bmpfilters::BitmapError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessRequest {
    grayscale: bool,
    color_shift: Option<ColorShift>,
    scale: Option<f64>,
    box_blur: bool,
    swiss_cheese: bool,
    strips: usize,
    seed: Option<u64>,
}

impl Default for ProcessRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessRequest {
    /// A request that changes nothing.
    pub fn new() -> Self {
        Self {
            grayscale: false,
            color_shift: None,
            scale: None,
            box_blur: false,
            swiss_cheese: false,
            strips: DEFAULT_STRIPS,
            seed: None,
        }
    }

    pub fn grayscale(mut self) -> Self {
        self.grayscale = true;
        self
    }

    pub fn color_shift(mut self, shift: ColorShift) -> Self {
        self.color_shift = Some(shift);
        self
    }

    /// Nearest-neighbor resize by `factor`, which must be positive.
    pub fn resize(mut self, factor: f64) -> Self {
        self.scale = Some(factor);
        self
    }

    pub fn box_blur(mut self) -> Self {
        self.box_blur = true;
        self
    }

    /// Yellow tint per strip, then random black holes on the whole image.
    pub fn swiss_cheese(mut self) -> Self {
        self.swiss_cheese = true;
        self
    }

    /// Number of strips (and worker threads) for blur and tint.
    pub fn strips(mut self, strips: usize) -> Self {
        self.strips = strips;
        self
    }

    /// Seed for hole placement. Without one, the wall clock is used.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn strip_ops(&self) -> Vec<StripOp> {
        let mut ops = Vec::new();
        if self.swiss_cheese {
            ops.push(StripOp::SwissCheeseTint);
        }
        if self.box_blur {
            ops.push(StripOp::BoxBlur);
        }
        ops
    }

    /// Check the request against a `width` × `height` input without
    /// touching any pixels: the scale factor must be valid, the resized
    /// image must still fit the BMP header fields, and the post-resize
    /// width must split evenly into strips if strip filters are requested.
    pub fn validate(&self, width: u32, height: u32) -> Result<(), BitmapError> {
        let (width, height) = match self.scale {
            Some(factor) => filters::scaled_dimensions(width, height, factor)?,
            None => (width, height),
        };
        FileHeader::new(width, height)?;
        FormatHeader::new(width, height)?;
        if !self.strip_ops().is_empty() {
            StripPartitioner::new(self.strips).strip_width(width)?;
        }
        Ok(())
    }

    /// Run the requested filters on `image`.
    ///
    /// The request is validated first, so a bad scale factor or strip
    /// count fails before any filter runs.
    pub fn apply<S: Stop + Sync>(&self, image: &mut Image, stop: S) -> Result<(), BitmapError> {
        self.validate(image.width(), image.height())?;

        if self.grayscale {
            log::debug!("grayscale");
            filters::grayscale(image, &stop)?;
        }
        if let Some(shift) = self.color_shift {
            log::debug!("color shift {shift:?}");
            filters::color_shift(image, shift, &stop)?;
        }
        if let Some(factor) = self.scale {
            filters::resize(image, factor, &stop)?;
            log::debug!("resized by {factor} to {}x{}", image.width(), image.height());
        }

        let ops = self.strip_ops();
        StripPartitioner::new(self.strips).run(image, &ops, &stop)?;

        if self.swiss_cheese {
            let seed = self.seed.unwrap_or_else(clock_seed);
            let radius = filters::average_hole_radius(image.width(), image.height());
            let mut rng = StdRng::seed_from_u64(seed);
            let holes = filters::swiss_cheese_holes(image, radius, &mut rng, &stop)?;
            log::debug!(
                "punched {} holes (average radius {radius}, seed {seed})",
                holes.len()
            );
        }
        Ok(())
    }

    /// Run the requested filters on `bitmap.image`, then refresh its
    /// headers to the new geometry.
    pub fn process<S: Stop + Sync>(&self, bitmap: &mut Bitmap, stop: S) -> Result<(), BitmapError> {
        self.apply(&mut bitmap.image, stop)?;
        bitmap.refresh_headers()
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;
    use enough::Unstoppable;

    #[test]
    fn default_request_is_identity() {
        let mut img = Image::filled(3, 3, Pixel::new(1, 2, 3)).unwrap();
        let before = img.clone();
        ProcessRequest::new().apply(&mut img, Unstoppable).unwrap();
        assert_eq!(img, before);
    }

    #[test]
    fn partition_is_checked_against_resized_width() {
        // 10 wide does not split into 4, but 10 * 0.8 = 8 does.
        let req = ProcessRequest::new().resize(0.8).box_blur();
        assert!(req.validate(10, 10).is_ok());
        assert!(matches!(
            ProcessRequest::new().box_blur().validate(10, 10),
            Err(BitmapError::InvalidPartition { width: 10, strips: 4 })
        ));
    }

    #[test]
    fn invalid_request_leaves_image_untouched() {
        let mut img = Image::filled(6, 2, Pixel::new(50, 60, 70)).unwrap();
        let before = img.clone();
        let err = ProcessRequest::new()
            .grayscale()
            .swiss_cheese()
            .strips(4)
            .apply(&mut img, Unstoppable)
            .unwrap_err();
        assert!(matches!(err, BitmapError::InvalidPartition { .. }));
        assert_eq!(img, before);

        let err = ProcessRequest::new()
            .grayscale()
            .resize(-2.0)
            .apply(&mut img, Unstoppable)
            .unwrap_err();
        assert!(matches!(err, BitmapError::InvalidScale(_)));
        assert_eq!(img, before);
    }

    #[test]
    fn oversized_resize_fails_before_touching_bitmap() {
        // 40000 * 40000 * 3 + 54 does not fit the u32 file size field.
        let image = Image::filled(1, 1, Pixel::new(9, 8, 7)).unwrap();
        let mut bitmap = Bitmap::from_image(image).unwrap();
        let before = bitmap.clone();
        let req = ProcessRequest::new().grayscale().resize(40000.0);
        assert!(matches!(
            req.validate(1, 1),
            Err(BitmapError::DimensionsTooLarge { width: 40000, height: 40000 })
        ));
        assert!(matches!(
            req.process(&mut bitmap, Unstoppable),
            Err(BitmapError::DimensionsTooLarge { .. })
        ));
        assert_eq!(bitmap, before);

        // Width past i32::MAX is rejected by the format header.
        assert!(matches!(
            ProcessRequest::new().resize(f64::from(u32::MAX)).validate(1, 0),
            Err(BitmapError::DimensionsTooLarge { .. })
        ));
    }

    #[test]
    fn strip_ops_only_needed_for_blur_or_tint() {
        // 7 wide cannot be split, but nothing asks for strips.
        let mut img = Image::filled(7, 1, Pixel::new(255, 255, 255)).unwrap();
        ProcessRequest::new().grayscale().apply(&mut img, Unstoppable).unwrap();
        assert_eq!(ProcessRequest::new().strip_ops(), Vec::new());
        assert_eq!(
            ProcessRequest::new().box_blur().swiss_cheese().strip_ops(),
            [StripOp::SwissCheeseTint, StripOp::BoxBlur]
        );
    }
}
