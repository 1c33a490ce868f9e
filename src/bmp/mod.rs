//! 24-bit uncompressed BMP reading and writing.
//!
//! Layout: a 14-byte file header, a 40-byte BITMAPINFOHEADER, then
//! `height` scan lines of `width` blue/green/red triples, each line padded
//! with zero bytes to a multiple of 4. All integers are little-endian.
//! Scan lines are kept in file order: line 0 in the file is row 0 of the
//! [`Image`](crate::Image).

mod decode;
mod encode;

pub(crate) use decode::{Cursor, parse_headers, read_pixels};
pub use encode::encode;

use crate::error::BitmapError;

/// Size of the file header on disk.
pub const FILE_HEADER_SIZE: usize = 14;
/// Size of the BITMAPINFOHEADER on disk.
pub const FORMAT_HEADER_SIZE: usize = 40;
/// Both headers together; pixel data starts here.
pub const HEADERS_SIZE: usize = FILE_HEADER_SIZE + FORMAT_HEADER_SIZE;

/// The BMP file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    /// Expected to be `b"BM"`.
    pub signature: [u8; 2],
    /// Total file size in bytes.
    pub size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Offset of the pixel data from the start of the file.
    pub pixel_offset: u32,
}

impl FileHeader {
    /// Header for a freshly built `width` × `height` image.
    pub fn new(width: u32, height: u32) -> Result<Self, BitmapError> {
        let mut header = Self {
            signature: *b"BM",
            size: 0,
            reserved1: 0,
            reserved2: 0,
            pixel_offset: HEADERS_SIZE as u32,
        };
        header.refresh(width, height)?;
        Ok(header)
    }

    /// Set `size` to `width * height * 3 + 54`.
    ///
    /// Row padding is not counted, matching what the files this crate
    /// reads were written with.
    pub fn refresh(&mut self, width: u32, height: u32) -> Result<(), BitmapError> {
        self.size = u64::from(width)
            .checked_mul(u64::from(height))
            .and_then(|px| px.checked_mul(3))
            .and_then(|bytes| bytes.checked_add(HEADERS_SIZE as u64))
            .and_then(|size| u32::try_from(size).ok())
            .ok_or(BitmapError::DimensionsTooLarge {
                width: width.into(),
                height: height.into(),
            })?;
        Ok(())
    }
}

/// The BITMAPINFOHEADER (DIB header).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatHeader {
    /// Size of this header; 40 for BITMAPINFOHEADER.
    pub header_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    /// 0 means uncompressed (BI_RGB).
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub important_colors: u32,
}

impl FormatHeader {
    /// Header for a freshly built 24-bit `width` × `height` image at 72 DPI.
    pub fn new(width: u32, height: u32) -> Result<Self, BitmapError> {
        let mut header = Self {
            header_size: FORMAT_HEADER_SIZE as u32,
            width: 0,
            height: 0,
            planes: 1,
            bits_per_pixel: 24,
            compression: 0,
            image_size: 0,
            x_pixels_per_meter: 2835,
            y_pixels_per_meter: 2835,
            colors_used: 0,
            important_colors: 0,
        };
        header.refresh(width, height)?;
        Ok(header)
    }

    /// Set `width` and `height` to the image's current dimensions.
    pub fn refresh(&mut self, width: u32, height: u32) -> Result<(), BitmapError> {
        let (Ok(w), Ok(h)) = (i32::try_from(width), i32::try_from(height)) else {
            return Err(BitmapError::DimensionsTooLarge {
                width: width.into(),
                height: height.into(),
            });
        };
        self.width = w;
        self.height = h;
        Ok(())
    }

    /// Width and height as unsigned values, rejecting negative fields.
    pub fn dimensions(&self) -> Result<(u32, u32), BitmapError> {
        let width = u32::try_from(self.width).map_err(|_| {
            BitmapError::InvalidHeader(alloc::format!("negative BMP width {}", self.width))
        })?;
        let height = u32::try_from(self.height).map_err(|_| {
            BitmapError::InvalidHeader(alloc::format!(
                "negative BMP height {} (top-down bitmaps are not supported)",
                self.height
            ))
        })?;
        Ok((width, height))
    }
}

/// Controls how strictly the BMP decoder validates header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BmpPermissiveness {
    /// Everything `Standard` checks, plus planes == 1, a 40-byte
    /// format header, and pixel data starting at byte 54.
    Strict,

    /// Reject a signature other than `BM`, bit depths other than 24,
    /// and any compression.
    #[default]
    Standard,

    /// Trust the header as read. Anomalies are logged, not rejected.
    /// Only negative dimensions and truncated input still fail.
    Permissive,
}

/// Zero bytes appended to each scan line of `width` pixels.
pub fn row_padding(width: u32) -> usize {
    let row_bytes = width as usize * crate::pixel::BYTES_PER_PIXEL;
    (4 - row_bytes % 4) % 4
}

/// Scan-line length on disk, padding included.
pub(crate) fn row_stride(width: u32) -> Result<usize, BitmapError> {
    (width as usize)
        .checked_mul(crate::pixel::BYTES_PER_PIXEL)
        .and_then(|b| b.checked_add(row_padding(width)))
        .ok_or(BitmapError::DimensionsTooLarge {
            width: width.into(),
            height: 0,
        })
}
