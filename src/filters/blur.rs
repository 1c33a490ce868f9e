//! 3×3 box blur.

use enough::Stop;

use crate::error::BitmapError;
use crate::image::Image;
use crate::pixel::Pixel;

/// Replace each pixel by the truncated mean of its 3×3 neighborhood.
///
/// Neighbors past an edge are clamped to the nearest row or column, so
/// border pixels count themselves more than once. All nine samples come
/// from a snapshot taken before the pass.
pub fn box_blur(image: &mut Image, stop: &dyn Stop) -> Result<(), BitmapError> {
    if image.is_empty() {
        return Ok(());
    }
    let source = image.clone();
    let last_row = source.height() as usize - 1;
    let last_col = source.width() as usize - 1;

    for y in 0..=last_row {
        if y % 16 == 0 {
            stop.check()?;
        }
        let rows = [
            source.row(y.saturating_sub(1)),
            source.row(y),
            source.row((y + 1).min(last_row)),
        ];
        for (x, out) in image.row_mut(y).iter_mut().enumerate() {
            let cols = [x.saturating_sub(1), x, (x + 1).min(last_col)];
            let (mut r, mut g, mut b) = (0u16, 0u16, 0u16);
            for row in &rows {
                for &c in &cols {
                    let px = row[c];
                    r += u16::from(px.r);
                    g += u16::from(px.g);
                    b += u16::from(px.b);
                }
            }
            *out = Pixel::new((r / 9) as u8, (g / 9) as u8, (b / 9) as u8);
        }
    }
    Ok(())
}
