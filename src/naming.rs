//! Derivative filename convention shared by all three passes.
//!
//! The optimizer writes, and the picture rewriter looks up, derivatives by
//! position alone — there is no manifest. For a source `photo.jpg` the full
//! derivative set is:
//!
//! ```text
//! photo.jpg            # overwritten in place
//! photo.webp           # WebP sibling (extension swap)
//! photo-thumb.jpg      # thumbnail (stem suffix, original extension)
//! photo-thumb.webp     # thumbnail WebP sibling
//! ```
//!
//! Anything consuming the output (web server, build pipeline) must honor
//! this exact naming to locate responsive variants, so the rules live in
//! one place.

use std::path::{Path, PathBuf};

/// Stem suffix marking a thumbnail derivative.
pub const THUMB_SUFFIX: &str = "-thumb";

/// Extensions the raster pipeline accepts, lowercase.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Whether the path has a supported raster extension (case-insensitive).
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SUPPORTED_EXTENSIONS.iter().any(|s| e.eq_ignore_ascii_case(s)))
}

/// Whether the path is itself a thumbnail derivative.
///
/// Thumbnails are excluded from the optimizer's candidate set up front so a
/// re-run never produces a thumbnail-of-thumbnail.
pub fn is_thumbnail(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.ends_with(THUMB_SUFFIX))
}

/// WebP sibling of a source image (`photo.jpg` → `photo.webp`).
pub fn webp_sibling(path: &Path) -> PathBuf {
    path.with_extension("webp")
}

/// Thumbnail sibling in the source's own format (`photo.jpg` → `photo-thumb.jpg`).
pub fn thumb_sibling(path: &Path) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    path.with_file_name(format!("{stem}{THUMB_SUFFIX}.{ext}"))
}

/// Thumbnail WebP sibling (`photo.jpg` → `photo-thumb.webp`).
pub fn thumb_webp_sibling(path: &Path) -> PathBuf {
    webp_sibling(&thumb_sibling(path))
}

/// Split an HTML `src` value into stem and extension when the extension is
/// a supported raster type. Returns `None` for anything else (SVG, data
/// URIs, already-WebP sources, extensionless paths).
fn split_supported(src: &str) -> Option<(&str, &str)> {
    let dot = src.rfind('.')?;
    let ext = &src[dot + 1..];
    SUPPORTED_EXTENSIONS
        .iter()
        .any(|s| ext.eq_ignore_ascii_case(s))
        .then_some((&src[..dot], ext))
}

/// WebP counterpart of an HTML `src` value, or `None` when the source is
/// not a supported raster type.
pub fn webp_src(src: &str) -> Option<String> {
    split_supported(src).map(|(stem, _)| format!("{stem}.webp"))
}

/// Thumbnail counterpart of an HTML `src` value, keeping the original
/// extension (and its case) intact.
pub fn thumb_src(src: &str) -> Option<String> {
    split_supported(src).map(|(stem, ext)| format!("{stem}{THUMB_SUFFIX}.{ext}"))
}

/// Thumbnail WebP counterpart of an HTML `src` value.
pub fn thumb_webp_src(src: &str) -> Option<String> {
    split_supported(src).map(|(stem, _)| format!("{stem}{THUMB_SUFFIX}.webp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_extensions_case_insensitive() {
        assert!(has_supported_extension(Path::new("a.jpg")));
        assert!(has_supported_extension(Path::new("a.JPEG")));
        assert!(has_supported_extension(Path::new("b.PNG")));
        assert!(!has_supported_extension(Path::new("c.webp")));
        assert!(!has_supported_extension(Path::new("d.svg")));
        assert!(!has_supported_extension(Path::new("noext")));
    }

    #[test]
    fn thumbnail_detection() {
        assert!(is_thumbnail(Path::new("images/a-thumb.jpg")));
        assert!(is_thumbnail(Path::new("a-thumb.png")));
        assert!(!is_thumbnail(Path::new("images/a.jpg")));
        assert!(!is_thumbnail(Path::new("thumbnail.jpg")));
    }

    #[test]
    fn sibling_paths() {
        let src = Path::new("images/photo.jpg");
        assert_eq!(webp_sibling(src), Path::new("images/photo.webp"));
        assert_eq!(thumb_sibling(src), Path::new("images/photo-thumb.jpg"));
        assert_eq!(
            thumb_webp_sibling(src),
            Path::new("images/photo-thumb.webp")
        );
    }

    #[test]
    fn src_mapping_preserves_extension_case() {
        assert_eq!(webp_src("images/a.JPG"), Some("images/a.webp".into()));
        assert_eq!(
            thumb_src("images/a.JPG"),
            Some("images/a-thumb.JPG".into())
        );
        assert_eq!(
            thumb_webp_src("images/a.png"),
            Some("images/a-thumb.webp".into())
        );
    }

    #[test]
    fn src_mapping_rejects_unsupported() {
        assert_eq!(webp_src("images/logo.svg"), None);
        assert_eq!(webp_src("images/a.webp"), None);
        assert_eq!(thumb_src("plain"), None);
    }
}
