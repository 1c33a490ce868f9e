use enough::Stop;

use crate::error::BitmapError;
use crate::image::Image;

/// How far the swiss-cheese tint lowers the blue channel.
pub const TINT_BLUE_REDUCTION: u8 = 100;

/// Tint toward yellow by lowering blue, floored at 0. Red and green are
/// unchanged.
pub fn swiss_cheese_tint(image: &mut Image, stop: &dyn Stop) -> Result<(), BitmapError> {
    for (y, row) in image.rows_mut().enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for px in row {
            px.b = px.b.saturating_sub(TINT_BLUE_REDUCTION);
        }
    }
    Ok(())
}
