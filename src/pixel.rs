/// One 24-bit pixel: three independent 8-bit channels.
pub type Pixel = rgb::RGB8;

/// Fully black pixel, used for punched holes.
pub const BLACK: Pixel = Pixel { r: 0, g: 0, b: 0 };

/// Bytes per stored pixel in a 24-bit BMP.
pub(crate) const BYTES_PER_PIXEL: usize = 3;

/// Build a pixel from BMP's on-disk blue, green, red order.
#[inline]
pub(crate) fn from_bgr(bgr: [u8; 3]) -> Pixel {
    Pixel {
        r: bgr[2],
        g: bgr[1],
        b: bgr[0],
    }
}

/// Pixel in BMP's on-disk blue, green, red order.
#[inline]
pub(crate) fn to_bgr(px: Pixel) -> [u8; 3] {
    [px.b, px.g, px.r]
}
