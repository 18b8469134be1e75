//! Batch image optimization.
//!
//! Walks the image directory and, for every candidate source:
//!
//! 1. skips it when its WebP sibling is already newer (unless `--force`);
//! 2. overwrites the original, downscaled to `max_width` if wider and
//!    re-encoded (JPEG at fixed quality, PNG losslessly);
//! 3. always writes the WebP sibling at its own quality;
//! 4. writes the `-thumb` pair when the result is still wider than
//!    `thumb_width`.
//!
//! A missing image directory is fatal. Everything else — zero-byte files,
//! decode failures, encode failures — is a per-file [`Outcome::Failed`]
//! that the batch survives. One file at a time, no parallelism: the whole
//! run is bounded by a few dozen marketing images.
//!
//! Re-running is safe: thumbnails are excluded from the candidate set up
//! front, and the sibling guard keeps already-lossy JPEGs from being
//! recompressed again on every run.

use crate::config::ImagesConfig;
use crate::imaging::{
    BackendError, Dimensions, ImageBackend, Quality, ReencodeParams, ResizeParams, RustBackend,
    fits_within, scale_to_width,
};
use crate::report::{Outcome, RunReport, SkipReason};
use crate::{naming, report, scan};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptimizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Images directory not found: {0}")]
    ImagesDirNotFound(PathBuf),
}

/// Optimize every candidate image under `site_root`'s image directory.
pub fn optimize(
    site_root: &Path,
    config: &ImagesConfig,
    force: bool,
) -> Result<RunReport, OptimizeError> {
    let images_dir = site_root.join(&config.dir);
    if !images_dir.is_dir() {
        return Err(OptimizeError::ImagesDirNotFound(images_dir));
    }
    let backend = RustBackend::new();
    optimize_with_backend(&backend, site_root, &images_dir, config, force, true)
}

/// Optimize using a specific backend (allows testing with a mock).
pub fn optimize_with_backend(
    backend: &impl ImageBackend,
    site_root: &Path,
    images_dir: &Path,
    config: &ImagesConfig,
    force: bool,
    verbose: bool,
) -> Result<RunReport, OptimizeError> {
    let candidates = scan::collect_images(images_dir)?;
    let total = candidates.len();
    if verbose {
        println!("Found {} images to optimize", total);
    }

    let mut run = RunReport::new();
    for (i, path) in candidates.iter().enumerate() {
        let outcome = if !force && config.skip_optimized && is_already_optimized(path) {
            Outcome::Skipped(SkipReason::AlreadyOptimized)
        } else {
            match optimize_one(backend, path, config) {
                Ok(outcome) => outcome,
                Err(e) => Outcome::Failed(e.to_string()),
            }
        };

        run.push(scan::display_path(path, site_root), outcome);
        if verbose {
            report::print_item(i + 1, total, run.items.last().unwrap());
        }
    }

    Ok(run)
}

/// Whether the WebP sibling already reflects this source: present and at
/// least as new. The derivative itself is the marker — no sidecar state.
fn is_already_optimized(source: &Path) -> bool {
    let sibling = naming::webp_sibling(source);
    let (Ok(source_meta), Ok(sibling_meta)) =
        (std::fs::metadata(source), std::fs::metadata(&sibling))
    else {
        return false;
    };
    match (source_meta.modified(), sibling_meta.modified()) {
        (Ok(source_time), Ok(sibling_time)) => sibling_time >= source_time,
        _ => false,
    }
}

/// Run the full per-file pipeline. Any error aborts this file only; no
/// derivative is written after the first failure.
fn optimize_one(
    backend: &impl ImageBackend,
    path: &Path,
    config: &ImagesConfig,
) -> Result<Outcome, BackendError> {
    let original_bytes = std::fs::metadata(path)?.len();

    let dims = backend.identify(path)?;
    let target = scale_to_width(dims, config.max_width);

    let jpeg_quality = Quality::new(config.jpeg_quality);
    let webp_quality = Quality::new(config.webp_quality);

    // Overwrite the original: resample when it was too wide, otherwise just
    // re-encode at the same size (compression still applies).
    if target != dims {
        backend.resize(&ResizeParams {
            source: path.to_path_buf(),
            output: path.to_path_buf(),
            width: target.width,
            height: target.height,
            quality: jpeg_quality,
        })?;
    } else {
        backend.reencode(&ReencodeParams {
            source: path.to_path_buf(),
            output: path.to_path_buf(),
            quality: jpeg_quality,
        })?;
    }

    // WebP sibling, always, from the now-optimized original.
    backend.reencode(&ReencodeParams {
        source: path.to_path_buf(),
        output: naming::webp_sibling(path),
        quality: webp_quality,
    })?;

    // Thumbnail pair when the optimized image is still wider than the
    // thumbnail threshold.
    let thumbnailed = !fits_within(target, config.thumb_width);
    if thumbnailed {
        let thumb = scale_to_width(target, config.thumb_width);
        write_thumbnail(backend, path, naming::thumb_sibling(path), thumb, jpeg_quality)?;
        write_thumbnail(
            backend,
            path,
            naming::thumb_webp_sibling(path),
            thumb,
            webp_quality,
        )?;
    }

    let final_bytes = std::fs::metadata(path)?.len();
    Ok(Outcome::Optimized {
        original_bytes,
        final_bytes,
        width: target.width,
        height: target.height,
        thumbnailed,
    })
}

fn write_thumbnail(
    backend: &impl ImageBackend,
    source: &Path,
    output: PathBuf,
    dims: Dimensions,
    quality: Quality,
) -> Result<(), BackendError> {
    backend.resize(&ResizeParams {
        source: source.to_path_buf(),
        output,
        width: dims.width,
        height: dims.height,
        quality,
    })
}
