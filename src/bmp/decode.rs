//! BMP header parsing and 24-bit pixel reading.

use alloc::vec::Vec;

use enough::Stop;

use super::{BmpPermissiveness, FileHeader, FormatHeader, row_padding};
use crate::error::BitmapError;
use crate::pixel::{BYTES_PER_PIXEL, Pixel, from_bgr};

// ── Cursor for reading from &[u8] ───────────────────────────────────

pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn skip(&mut self, n: usize) -> Result<(), BitmapError> {
        let new_pos = self.pos.checked_add(n).ok_or(BitmapError::UnexpectedEof)?;
        if new_pos > self.data.len() {
            return Err(BitmapError::UnexpectedEof);
        }
        self.pos = new_pos;
        Ok(())
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let bytes = self
            .data
            .get(self.pos..self.pos + N)
            .ok_or(BitmapError::UnexpectedEof)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        self.pos += N;
        Ok(buf)
    }

    fn get_u16_le(&mut self) -> Result<u16, BitmapError> {
        Ok(u16::from_le_bytes(self.read_fixed_bytes()?))
    }

    fn get_u32_le(&mut self) -> Result<u32, BitmapError> {
        Ok(u32::from_le_bytes(self.read_fixed_bytes()?))
    }

    fn get_i32_le(&mut self) -> Result<i32, BitmapError> {
        Ok(i32::from_le_bytes(self.read_fixed_bytes()?))
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], BitmapError> {
        let end = self.pos.checked_add(n).ok_or(BitmapError::UnexpectedEof)?;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or(BitmapError::UnexpectedEof)?;
        self.pos = end;
        Ok(bytes)
    }
}

// ── Headers ─────────────────────────────────────────────────────────

/// Read both headers in file order and validate them per `permissiveness`.
pub(crate) fn parse_headers(
    cursor: &mut Cursor<'_>,
    permissiveness: BmpPermissiveness,
) -> Result<(FileHeader, FormatHeader), BitmapError> {
    let file = FileHeader {
        signature: cursor.read_fixed_bytes()?,
        size: cursor.get_u32_le()?,
        reserved1: cursor.get_u16_le()?,
        reserved2: cursor.get_u16_le()?,
        pixel_offset: cursor.get_u32_le()?,
    };
    let format = FormatHeader {
        header_size: cursor.get_u32_le()?,
        width: cursor.get_i32_le()?,
        height: cursor.get_i32_le()?,
        planes: cursor.get_u16_le()?,
        bits_per_pixel: cursor.get_u16_le()?,
        compression: cursor.get_u32_le()?,
        image_size: cursor.get_u32_le()?,
        x_pixels_per_meter: cursor.get_i32_le()?,
        y_pixels_per_meter: cursor.get_i32_le()?,
        colors_used: cursor.get_u32_le()?,
        important_colors: cursor.get_u32_le()?,
    };

    validate(&file, &format, permissiveness)?;
    Ok((file, format))
}

fn validate(
    file: &FileHeader,
    format: &FormatHeader,
    permissiveness: BmpPermissiveness,
) -> Result<(), BitmapError> {
    // Dimensions size the allocation, so these are checked in every mode.
    format.dimensions()?;

    let is_permissive = permissiveness == BmpPermissiveness::Permissive;
    let is_strict = permissiveness == BmpPermissiveness::Strict;

    if &file.signature != b"BM" {
        if !is_permissive {
            return Err(BitmapError::UnrecognizedFormat);
        }
        log::warn!("BMP signature is {:?}, expected \"BM\"", file.signature);
    }
    if format.bits_per_pixel != 24 {
        if !is_permissive {
            return Err(BitmapError::UnsupportedVariant(alloc::format!(
                "{}-bit BMP (only 24-bit is supported)",
                format.bits_per_pixel
            )));
        }
        log::warn!(
            "BMP declares {} bits per pixel, reading as 24-bit",
            format.bits_per_pixel
        );
    }
    if format.compression != 0 {
        if !is_permissive {
            return Err(BitmapError::UnsupportedVariant(alloc::format!(
                "BMP compression type {} (only uncompressed is supported)",
                format.compression
            )));
        }
        log::warn!(
            "BMP declares compression {}, reading as uncompressed",
            format.compression
        );
    }

    if is_strict {
        if format.planes != 1 {
            return Err(BitmapError::InvalidHeader(alloc::format!(
                "BMP planes must be 1, got {}",
                format.planes
            )));
        }
        if format.header_size as usize != super::FORMAT_HEADER_SIZE {
            return Err(BitmapError::InvalidHeader(alloc::format!(
                "expected a 40-byte BITMAPINFOHEADER, got {} bytes",
                format.header_size
            )));
        }
        if file.pixel_offset as usize != super::HEADERS_SIZE {
            return Err(BitmapError::InvalidHeader(alloc::format!(
                "pixel data offset {} (expected 54)",
                file.pixel_offset
            )));
        }
    }
    Ok(())
}

// ── Pixels ──────────────────────────────────────────────────────────

/// Read `height` padded scan lines of `width` BGR pixels.
///
/// The whole pixel area is bounds-checked before allocating, so a
/// truncated file fails with `UnexpectedEof` without a large allocation.
pub(crate) fn read_pixels(
    cursor: &mut Cursor<'_>,
    width: u32,
    height: u32,
    stop: &dyn Stop,
) -> Result<Vec<Pixel>, BitmapError> {
    if width == 0 || height == 0 {
        // No pixel bytes and no padding, however many rows are declared.
        return Ok(Vec::new());
    }
    let w = width as usize;
    let h = height as usize;
    let pad = row_padding(width);
    let row_bytes = w
        .checked_mul(BYTES_PER_PIXEL)
        .ok_or(BitmapError::DimensionsTooLarge {
            width: width.into(),
            height: height.into(),
        })?;
    let needed = (row_bytes + pad)
        .checked_mul(h)
        .ok_or(BitmapError::DimensionsTooLarge {
            width: width.into(),
            height: height.into(),
        })?;
    if cursor.remaining() < needed {
        return Err(BitmapError::UnexpectedEof);
    }

    let mut pixels = Vec::with_capacity(w * h);
    for row in 0..h {
        if row % 16 == 0 {
            stop.check()?;
        }
        let line = cursor.take(row_bytes)?;
        pixels.extend(
            line.chunks_exact(BYTES_PER_PIXEL)
                .map(|bgr| from_bgr([bgr[0], bgr[1], bgr[2]])),
        );
        cursor.skip(pad)?;
    }
    Ok(pixels)
}
