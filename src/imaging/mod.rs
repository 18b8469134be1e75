//! Image processing — pure Rust decode/resize plus libwebp encoding.
//!
//! The module is split into:
//! - **Calculations**: pure functions for dimension math (unit testable)
//! - **Parameters**: data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{fits_within, scale_to_width};
pub use params::{Quality, ReencodeParams, ResizeParams};
pub use rust_backend::RustBackend;
