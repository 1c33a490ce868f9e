use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding, encoding and filtering.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("headers do not describe the image: {0}")]
    HeaderMismatch(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u64, height: u64 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pixel buffer size mismatch: need {needed} pixels, got {actual}")]
    BufferSizeMismatch { needed: usize, actual: usize },

    #[error("pixel ({row}, {col}) is outside a {width}x{height} image")]
    OutOfBounds {
        row: usize,
        col: usize,
        width: u32,
        height: u32,
    },

    #[error("scale factor must be a positive finite number, got {0}")]
    InvalidScale(f64),

    #[error("cannot split width {width} into {strips} equal strips")]
    InvalidPartition { width: u32, strips: usize },

    #[error("strips do not reassemble the image: {0}")]
    StripMismatch(String),

    #[error("failed to start strip workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}
