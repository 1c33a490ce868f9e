use crate::error::BitmapError;
use crate::pixel::BYTES_PER_PIXEL;

/// Caps on what a decode may allocate, checked after the headers are
/// parsed and before any pixel is read.
///
/// Every field defaults to `None`, meaning unlimited.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Cap on `width * height`.
    pub max_pixels: Option<u64>,
    /// Cap on the decoded pixel grid, at 3 bytes per pixel.
    pub max_memory_bytes: Option<u64>,
}

fn within(what: &str, value: u64, max: Option<u64>) -> Result<(), BitmapError> {
    match max {
        Some(max) if value > max => Err(BitmapError::LimitExceeded(alloc::format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}

impl Limits {
    /// Check a `width` × `height` image against every limit.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), BitmapError> {
        let pixels = u64::from(width) * u64::from(height);
        within("width", width.into(), self.max_width)?;
        within("height", height.into(), self.max_height)?;
        within("pixel count", pixels, self.max_pixels)?;
        within(
            "pixel buffer bytes",
            pixels.saturating_mul(BYTES_PER_PIXEL as u64),
            self.max_memory_bytes,
        )
    }
}
