use enough::Stop;

use crate::bitmap::Bitmap;
use crate::bmp::{self, BmpPermissiveness};
use crate::error::BitmapError;
use crate::image::Image;
use crate::limits::Limits;

/// Builder for decoding a 24-bit BMP.
///
/// ```no_run
/// use bmpfilters::{BmpPermissiveness, DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // your BMP bytes
/// let limits = Limits { max_pixels: Some(64 * 1024 * 1024), ..Default::default() };
/// let bitmap = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .with_permissiveness(BmpPermissiveness::Strict)
///     .decode(Unstoppable)?;
/// println!("{}x{}", bitmap.image.width(), bitmap.image.height());
/// # Ok::<(), bmpfilters::BitmapError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    permissiveness: BmpPermissiveness,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            permissiveness: BmpPermissiveness::default(),
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_permissiveness(mut self, permissiveness: BmpPermissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    /// Decode headers and pixels.
    pub fn decode(self, stop: impl Stop) -> Result<Bitmap, BitmapError> {
        let mut cursor = bmp::Cursor::new(self.data);
        let (file_header, format_header) = bmp::parse_headers(&mut cursor, self.permissiveness)?;
        let (width, height) = format_header.dimensions()?;

        if let Some(limits) = self.limits {
            limits.check(width, height)?;
        }
        stop.check()?;

        let pixels = bmp::read_pixels(&mut cursor, width, height, &stop)?;
        let image = Image::new(pixels, width, height)?;
        log::debug!("decoded {width}x{height} BMP");

        Ok(Bitmap {
            file_header,
            format_header,
            image,
        })
    }
}
