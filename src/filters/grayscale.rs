//! Grayscale conversion.
//!
//! Uses the BT.601 luma weights (0.299 R, 0.587 G, 0.114 B) in integer
//! thousandths so the result truncates exactly: white stays 255.

use enough::Stop;

use crate::error::BitmapError;
use crate::image::Image;
use crate::pixel::Pixel;

const LUMA_R: u32 = 299;
const LUMA_G: u32 = 587;
const LUMA_B: u32 = 114;

/// Truncated luma of one pixel.
#[inline]
pub fn luma(px: Pixel) -> u8 {
    let sum = LUMA_B * u32::from(px.b) + LUMA_G * u32::from(px.g) + LUMA_R * u32::from(px.r);
    // Weights sum to 1000, so sum / 1000 <= 255.
    (sum / 1000) as u8
}

/// Replace every channel of every pixel with its luma.
pub fn grayscale(image: &mut Image, stop: &dyn Stop) -> Result<(), BitmapError> {
    for (y, row) in image.rows_mut().enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for px in row {
            let gray = luma(*px);
            *px = Pixel::new(gray, gray, gray);
        }
    }
    Ok(())
}
