//! # bmpfilters
//!
//! Decode 24-bit uncompressed BMP images, run a small set of filters over
//! the pixels, and encode the result back to BMP.
//!
//! ## Filters
//!
//! - **Grayscale**: BT.601 luma, truncated.
//! - **Color shift**: grayscale, then signed per-channel offsets, clamped.
//! - **Resize**: nearest-neighbor by a positive factor.
//! - **Box blur**: 3×3 mean with clamped edges.
//! - **Swiss cheese**: lowers blue by 100, then punches random black holes.
//!
//! Box blur and the swiss-cheese tint run on equal-width column strips,
//! one worker thread per strip ([`StripPartitioner`]).
//!
//! ## Non-Goals
//!
//! - Bit depths other than 24, compression, palettes
//! - Top-down (negative height) bitmaps
//! - Streaming: the whole image is held in memory
//!
//! ## Usage
//!
//! ```no_run
//! use bmpfilters::{ProcessRequest, Unstoppable, decode_bmp};
//!
//! let data: &[u8] = &[]; // your BMP bytes
//! let mut bitmap = decode_bmp(data, Unstoppable)?;
//! ProcessRequest::new()
//!     .swiss_cheese()
//!     .box_blur()
//!     .strips(4)
//!     .process(&mut bitmap, Unstoppable)?;
//! let encoded = bitmap.encode(Unstoppable)?;
//! # Ok::<(), bmpfilters::BitmapError>(())
//! ```

#![forbid(unsafe_code)]

extern crate alloc;

mod bitmap;
mod decode;
mod error;
mod image;
mod limits;
mod pipeline;
mod pixel;

pub mod bmp;
pub mod filters;
pub mod strips;

// Re-exports
pub use bitmap::Bitmap;
pub use bmp::{BmpPermissiveness, FileHeader, FormatHeader};
pub use decode::DecodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use filters::ColorShift;
pub use image::Image;
pub use limits::Limits;
pub use pipeline::ProcessRequest;
pub use pixel::{BLACK, Pixel};
pub use strips::{DEFAULT_STRIPS, Strip, StripOp, StripPartitioner};

/// Decode a BMP with default limits and [`BmpPermissiveness::Standard`].
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<Bitmap, BitmapError> {
    DecodeRequest::new(data).decode(stop)
}

/// Refresh `bitmap`'s headers to its image, then encode it.
pub fn encode_bmp(
    bitmap: &mut Bitmap,
    stop: impl Stop,
) -> Result<alloc::vec::Vec<u8>, BitmapError> {
    bitmap.encode(stop)
}
