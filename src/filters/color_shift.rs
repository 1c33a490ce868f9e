use enough::Stop;

use super::grayscale::grayscale;
use crate::error::BitmapError;
use crate::image::Image;

/// Signed per-channel offsets for [`color_shift`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColorShift {
    pub red: i32,
    pub green: i32,
    pub blue: i32,
}

impl ColorShift {
    pub fn new(red: i32, green: i32, blue: i32) -> Self {
        Self { red, green, blue }
    }
}

/// Add `by` to `value`, clamped to 0..=255.
#[inline]
pub fn shift_channel(value: u8, by: i32) -> u8 {
    i32::from(value).saturating_add(by).clamp(0, 255) as u8
}

/// Grayscale the image, then offset each channel and clamp.
///
/// The grayscale pass is unconditional: the shift tints a gray image
/// rather than adjusting the original hues.
pub fn color_shift(
    image: &mut Image,
    shift: ColorShift,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    grayscale(image, stop)?;
    for (y, row) in image.rows_mut().enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for px in row {
            px.r = shift_channel(px.r, shift.red);
            px.g = shift_channel(px.g, shift.green);
            px.b = shift_channel(px.b, shift.blue);
        }
    }
    Ok(())
}
