//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::backend::Dimensions;

/// Scale dimensions down so the width equals `max_width`, preserving the
/// aspect ratio. Dimensions already at or under the limit are returned
/// unchanged.
///
/// Height is `round(h * max_width / w)` — the rounding keeps the result
/// within half a pixel of the exact aspect ratio.
///
/// # Examples
/// ```
/// # use sitefix::imaging::{Dimensions, scale_to_width};
/// let dims = Dimensions { width: 3000, height: 2000 };
/// assert_eq!(
///     scale_to_width(dims, 1920),
///     Dimensions { width: 1920, height: 1280 }
/// );
/// ```
pub fn scale_to_width(dims: Dimensions, max_width: u32) -> Dimensions {
    if dims.width <= max_width {
        return dims;
    }
    let ratio = max_width as f64 / dims.width as f64;
    Dimensions {
        width: max_width,
        height: (dims.height as f64 * ratio).round().max(1.0) as u32,
    }
}

/// Whether dimensions fit within the width limit (no resize needed).
pub fn fits_within(dims: Dimensions, max_width: u32) -> bool {
    dims.width <= max_width
}
