//! Nearest-neighbor resize.
//!
//! Target pixel (i, j) samples source (floor(i / f), floor(j / f)).
//! Shrinking (f <= 1) runs in place: every source index is at or past its
//! target index, so walking targets in increasing order never reads a
//! pixel that has already been overwritten. Growing allocates a new grid.

use alloc::vec::Vec;

use enough::Stop;

use crate::error::BitmapError;
use crate::image::{Image, pixel_count};

/// Output size for `factor`, or `InvalidScale` if it is not positive
/// and finite.
pub fn scaled_dimensions(width: u32, height: u32, factor: f64) -> Result<(u32, u32), BitmapError> {
    if !(factor.is_finite() && factor > 0.0) {
        return Err(BitmapError::InvalidScale(factor));
    }
    let scale = |n: u32| -> Option<u32> {
        let scaled = (f64::from(n) * factor).floor();
        (scaled <= f64::from(u32::MAX)).then_some(scaled as u32)
    };
    match (scale(width), scale(height)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(BitmapError::DimensionsTooLarge {
            width: (f64::from(width) * factor) as u64,
            height: (f64::from(height) * factor) as u64,
        }),
    }
}

#[inline]
fn source_index(target: usize, factor: f64, len: usize) -> usize {
    ((target as f64 / factor) as usize).min(len - 1)
}

/// Resize `image` by `factor`. An invalid factor leaves the image untouched.
pub fn resize(image: &mut Image, factor: f64, stop: &dyn Stop) -> Result<(), BitmapError> {
    let (old_w, old_h) = (image.width() as usize, image.height() as usize);
    let (new_w, new_h) = scaled_dimensions(image.width(), image.height(), factor)?;
    let (nw, nh) = (new_w as usize, new_h as usize);

    if nw == 0 || nh == 0 {
        image.replace(Image::new(Vec::new(), new_w, new_h)?);
        return Ok(());
    }
    if factor <= 1.0 {
        let (buf, stride) = image.raw_mut();
        for i in 0..nh {
            if i % 16 == 0 {
                stop.check()?;
            }
            let src_row = source_index(i, factor, old_h) * stride;
            let dst_row = i * stride;
            for j in 0..nw {
                buf[dst_row + j] = buf[src_row + source_index(j, factor, old_w)];
            }
        }
        image.shrink_to(new_w, new_h);
    } else {
        let mut out = Vec::with_capacity(pixel_count(new_w, new_h)?);
        for i in 0..nh {
            if i % 16 == 0 {
                stop.check()?;
            }
            let src = image.row(source_index(i, factor, old_h));
            out.extend((0..nw).map(|j| src[source_index(j, factor, old_w)]));
        }
        image.replace(Image::new(out, new_w, new_h)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;
    use enough::Unstoppable;

    fn numbered(w: u32, h: u32) -> Image {
        let pixels = (0..w * h)
            .map(|n| Pixel::new(n as u8, (n / w) as u8, (n % w) as u8))
            .collect();
        Image::new(pixels, w, h).unwrap()
    }

    #[test]
    fn rejects_non_positive_factors() {
        let mut img = numbered(4, 4);
        let before = img.clone();
        for f in [0.0, -1.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                resize(&mut img, f, &Unstoppable),
                Err(BitmapError::InvalidScale(_))
            ));
        }
        assert_eq!(img, before);
    }

    #[test]
    fn factor_one_is_identity() {
        let mut img = numbered(5, 3);
        let before = img.clone();
        resize(&mut img, 1.0, &Unstoppable).unwrap();
        assert_eq!(img, before);
    }

    #[test]
    fn halving_samples_even_indices() {
        let mut img = numbered(4, 4);
        resize(&mut img, 0.5, &Unstoppable).unwrap();
        assert_eq!((img.width(), img.height()), (2, 2));
        let expected: Vec<_> = [(0, 0), (0, 2), (2, 0), (2, 2)]
            .iter()
            .map(|&(r, c)| Pixel::new((r * 4 + c) as u8, r as u8, c as u8))
            .collect();
        assert_eq!(img.to_vec(), expected);
    }

    #[test]
    fn doubling_repeats_pixels() {
        let mut img = numbered(2, 1);
        resize(&mut img, 2.0, &Unstoppable).unwrap();
        assert_eq!((img.width(), img.height()), (4, 2));
        let a = Pixel::new(0, 0, 0);
        let b = Pixel::new(1, 0, 1);
        assert_eq!(img.row(0), &[a, a, b, b]);
        assert_eq!(img.row(1), &[a, a, b, b]);
    }

    #[test]
    fn dimensions_are_floored() {
        for (w, h, f) in [(10, 7, 0.3), (9, 5, 1.5), (3, 3, 0.1), (1, 1, 2.7)] {
            let mut img = numbered(w, h);
            resize(&mut img, f, &Unstoppable).unwrap();
            assert_eq!(img.width(), (f64::from(w) * f).floor() as u32);
            assert_eq!(img.height(), (f64::from(h) * f).floor() as u32);
        }
    }

    #[test]
    fn shrink_then_grow_uses_logical_size() {
        let mut img = numbered(6, 6);
        resize(&mut img, 0.5, &Unstoppable).unwrap();
        resize(&mut img, 2.0, &Unstoppable).unwrap();
        assert_eq!((img.width(), img.height()), (6, 6));
        assert_eq!(img.get(5, 5).unwrap(), Pixel::new(28, 4, 4));
    }

    #[test]
    fn zero_width_input_does_not_walk_rows() {
        let mut img = Image::new(Vec::new(), 0, i32::MAX as u32).unwrap();
        resize(&mut img, 0.5, &Unstoppable).unwrap();
        assert_eq!((img.width(), img.height()), (0, (i32::MAX / 2) as u32));
        assert!(img.is_empty());
    }
}
