use alloc::vec::Vec;
use std::path::Path;

use enough::Stop;

use crate::bmp::{self, FileHeader, FormatHeader};
use crate::decode::DecodeRequest;
use crate::error::BitmapError;
use crate::image::Image;

/// A decoded BMP: both headers plus the pixel grid they describe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    pub file_header: FileHeader,
    pub format_header: FormatHeader,
    pub image: Image,
}

impl Bitmap {
    /// Wrap an image with fresh 24-bit headers.
    pub fn from_image(image: Image) -> Result<Self, BitmapError> {
        Ok(Self {
            file_header: FileHeader::new(image.width(), image.height())?,
            format_header: FormatHeader::new(image.width(), image.height())?,
            image,
        })
    }

    /// Bring the file size and dimensions in both headers up to date with
    /// the image. Needed after any filter that changes geometry.
    pub fn refresh_headers(&mut self) -> Result<(), BitmapError> {
        let (width, height) = (self.image.width(), self.image.height());
        self.file_header.refresh(width, height)?;
        self.format_header.refresh(width, height)
    }

    /// Refresh the headers, then encode.
    pub fn encode(&mut self, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
        self.refresh_headers()?;
        bmp::encode(&self.file_header, &self.format_header, &self.image, &stop)
    }

    /// Read and decode a BMP file with default settings.
    pub fn read_file(path: impl AsRef<Path>, stop: impl Stop) -> Result<Self, BitmapError> {
        let data = std::fs::read(path.as_ref())?;
        DecodeRequest::new(&data).decode(stop)
    }

    /// Encode completely, then write `path`. Nothing is written if encoding
    /// fails or is cancelled.
    pub fn write_file(&mut self, path: impl AsRef<Path>, stop: impl Stop) -> Result<(), BitmapError> {
        let encoded = self.encode(stop)?;
        std::fs::write(path.as_ref(), encoded)?;
        log::debug!("wrote {}", path.as_ref().display());
        Ok(())
    }
}
