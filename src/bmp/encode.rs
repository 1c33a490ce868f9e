//! BMP encoder: both headers verbatim, then padded 24-bit scan lines.

use alloc::vec::Vec;

use enough::Stop;

use super::{FileHeader, FormatHeader, HEADERS_SIZE, row_padding, row_stride};
use crate::error::BitmapError;
use crate::image::Image;
use crate::pixel::to_bgr;

/// Encode `image` with the given headers.
///
/// The headers are written exactly as given; their `width` and `height`
/// must already match the image (see [`crate::Bitmap::refresh_headers`]),
/// otherwise `HeaderMismatch` is returned and nothing is produced.
pub fn encode(
    file: &FileHeader,
    format: &FormatHeader,
    image: &Image,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BitmapError> {
    let (width, height) = format.dimensions()?;
    if (width, height) != (image.width(), image.height()) {
        return Err(BitmapError::HeaderMismatch(alloc::format!(
            "header says {width}x{height}, image is {}x{}",
            image.width(),
            image.height()
        )));
    }

    let pixel_data_size = row_stride(width)?
        .checked_mul(height as usize)
        .ok_or(BitmapError::DimensionsTooLarge {
            width: width.into(),
            height: height.into(),
        })?;
    let mut out = Vec::with_capacity(HEADERS_SIZE + pixel_data_size);
    write_file_header(&mut out, file);
    write_format_header(&mut out, format);

    stop.check()?;

    let pad_bytes = row_padding(width);
    for (y, row) in image.rows().enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for px in row {
            out.extend_from_slice(&to_bgr(*px));
        }
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    }

    Ok(out)
}

fn write_file_header(out: &mut Vec<u8>, header: &FileHeader) {
    out.extend_from_slice(&header.signature);
    out.extend_from_slice(&header.size.to_le_bytes());
    out.extend_from_slice(&header.reserved1.to_le_bytes());
    out.extend_from_slice(&header.reserved2.to_le_bytes());
    out.extend_from_slice(&header.pixel_offset.to_le_bytes());
}

fn write_format_header(out: &mut Vec<u8>, header: &FormatHeader) {
    out.extend_from_slice(&header.header_size.to_le_bytes());
    out.extend_from_slice(&header.width.to_le_bytes());
    out.extend_from_slice(&header.height.to_le_bytes());
    out.extend_from_slice(&header.planes.to_le_bytes());
    out.extend_from_slice(&header.bits_per_pixel.to_le_bytes());
    out.extend_from_slice(&header.compression.to_le_bytes());
    out.extend_from_slice(&header.image_size.to_le_bytes());
    out.extend_from_slice(&header.x_pixels_per_meter.to_le_bytes());
    out.extend_from_slice(&header.y_pixels_per_meter.to_le_bytes());
    out.extend_from_slice(&header.colors_used.to_le_bytes());
    out.extend_from_slice(&header.important_colors.to_le_bytes());
}
