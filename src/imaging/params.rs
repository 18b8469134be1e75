//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the optimizer driver (which decides what files to
//! produce) and the [`backend`](super::backend) (which does the pixel work),
//! so the driver can be tested against a recording mock.

use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(82)
    }
}

/// Resample to an exact size and encode to the output path's format.
///
/// Source and output may be the same path (in-place overwrite).
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub quality: Quality,
}

/// Re-encode at the source's current dimensions, no resampling.
///
/// Used for images already narrower than the resize threshold (compression
/// is still applied) and for WebP siblings of unresized originals.
#[derive(Debug, Clone, PartialEq)]
pub struct ReencodeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub quality: Quality,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(82).value(), 82);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_matches_jpeg_setting() {
        assert_eq!(Quality::default().value(), 82);
    }
}
