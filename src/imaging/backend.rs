//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations the optimizer
//! needs: identify, resize, and reencode. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure decode/encode
//! through the `image` crate, statically linked. Tests drive the optimizer
//! with a recording mock instead.

use super::params::{ReencodeParams, ResizeParams};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Pixel dimensions after EXIF orientation has been accounted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// Each operation loads the source itself; backends are stateless, so the
/// driver can call them in any order against any path.
pub trait ImageBackend {
    /// Get image dimensions, corrected for EXIF orientation.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode, orient, flatten to RGB, resample to an exact size, and
    /// encode to the output path's format.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;

    /// Decode, orient, flatten to RGB, and encode at the current size.
    fn reencode(&self, params: &ReencodeParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Mock backend that records operations without touching pixels.
    #[derive(Default)]
    pub struct MockBackend {
        pub identify_results: RefCell<Vec<Dimensions>>,
        pub operations: RefCell<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Resize {
            source: String,
            output: String,
            width: u32,
            height: u32,
            quality: u32,
        },
        Reencode {
            source: String,
            output: String,
            quality: u32,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue dimensions returned by successive `identify` calls (popped
        /// from the back).
        pub fn with_dimensions(dims: Vec<Dimensions>) -> Self {
            Self {
                identify_results: RefCell::new(dims),
                operations: RefCell::new(Vec::new()),
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.borrow().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            self.operations
                .borrow_mut()
                .push(RecordedOp::Identify(path.to_string_lossy().to_string()));

            self.identify_results
                .borrow_mut()
                .pop()
                .ok_or_else(|| BackendError::ProcessingFailed("No mock dimensions".to_string()))
        }

        fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
            self.operations.borrow_mut().push(RecordedOp::Resize {
                source: params.source.to_string_lossy().to_string(),
                output: params.output.to_string_lossy().to_string(),
                width: params.width,
                height: params.height,
                quality: params.quality.value(),
            });
            Ok(())
        }

        fn reencode(&self, params: &ReencodeParams) -> Result<(), BackendError> {
            self.operations.borrow_mut().push(RecordedOp::Reencode {
                source: params.source.to_string_lossy().to_string(),
                output: params.output.to_string_lossy().to_string(),
                quality: params.quality.value(),
            });
            Ok(())
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 800,
            height: 600,
        }]);

        let result = backend.identify(Path::new("/test/image.jpg")).unwrap();
        assert_eq!(result.width, 800);
        assert_eq!(result.height, 600);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "/test/image.jpg"));
    }

    #[test]
    fn mock_identify_without_queued_dims_errors() {
        let backend = MockBackend::new();
        assert!(backend.identify(Path::new("/test.jpg")).is_err());
    }

    #[test]
    fn mock_records_resize_and_reencode() {
        use crate::imaging::params::Quality;
        let backend = MockBackend::new();

        backend
            .resize(&ResizeParams {
                source: "/source.jpg".into(),
                output: "/source.jpg".into(),
                width: 1920,
                height: 1280,
                quality: Quality::new(82),
            })
            .unwrap();
        backend
            .reencode(&ReencodeParams {
                source: "/source.jpg".into(),
                output: "/source.webp".into(),
                quality: Quality::new(80),
            })
            .unwrap();

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 2);
        assert!(matches!(
            &ops[0],
            RecordedOp::Resize {
                width: 1920,
                height: 1280,
                quality: 82,
                ..
            }
        ));
        assert!(matches!(
            &ops[1],
            RecordedOp::Reencode { output, quality: 80, .. } if output.ends_with(".webp")
        ));
    }
}
