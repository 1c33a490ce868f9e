//! Per-pixel and neighborhood filters.
//!
//! Every filter mutates an [`Image`](crate::Image) in place and takes its
//! parameters explicitly. When several are requested they run in this
//! order (see [`ProcessRequest`](crate::ProcessRequest)):
//!
//! 1. [`grayscale`]
//! 2. [`color_shift`] (grays the image first)
//! 3. [`resize`]
//! 4. [`swiss_cheese_tint`] and [`box_blur`], per strip
//! 5. [`swiss_cheese_holes`] on the merged image

mod blur;
mod color_shift;
mod grayscale;
mod holes;
mod resize;
mod tint;

pub use blur::box_blur;
pub use color_shift::{ColorShift, color_shift, shift_channel};
pub use grayscale::{grayscale, luma};
pub use holes::{
    Circle, average_hole_radius, plan_holes, punch_hole, swiss_cheese_holes,
};
pub use resize::{resize, scaled_dimensions};
pub use tint::{TINT_BLUE_REDUCTION, swiss_cheese_tint};
