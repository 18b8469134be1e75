//! Candidate discovery for the three passes.
//!
//! The filesystem is the data store: images live under a subdirectory of the
//! site root, HTML pages sit at the root itself. Discovery is deterministic
//! (sorted walk order) so progress output and reports are stable between
//! runs on the same tree.

use crate::naming;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Collect optimizer candidates: every supported raster under `root`,
/// excluding files already bearing the thumbnail marker.
///
/// The exclusion happens here, up front, so a second run over a tree full
/// of `-thumb` derivatives never thumbnails a thumbnail.
pub fn collect_images(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if naming::has_supported_extension(&path) && !naming::is_thumbnail(&path) {
            files.push(path);
        }
    }
    Ok(files)
}

/// Collect the HTML pages at the site root (non-recursive), sorted by name.
pub fn collect_html_files(site_root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(site_root)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case("html"))
                    .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Display path relative to the site root, for progress lines.
pub fn display_path(path: &Path, site_root: &Path) -> String {
    path.strip_prefix(site_root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn collect_images_filters_and_sorts() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(&root.join("b.jpg"));
        touch(&root.join("a.PNG"));
        touch(&root.join("nested/c.jpeg"));
        touch(&root.join("logo.svg"));
        touch(&root.join("notes.txt"));
        touch(&root.join("a-thumb.jpg"));
        touch(&root.join("nested/c-thumb.jpeg"));

        let names: Vec<String> = collect_images(root)
            .unwrap()
            .iter()
            .map(|p| display_path(p, root))
            .collect();
        assert_eq!(names, vec!["a.PNG", "b.jpg", "nested/c.jpeg"]);
    }

    #[test]
    fn collect_images_empty_tree() {
        let tmp = TempDir::new().unwrap();
        assert!(collect_images(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn collect_html_is_root_only_and_sorted() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(&root.join("index.html"));
        touch(&root.join("about.html"));
        touch(&root.join("style.css"));
        touch(&root.join("sub/page.html"));

        let names: Vec<String> = collect_html_files(root)
            .unwrap()
            .iter()
            .map(|p| display_path(p, root))
            .collect();
        assert_eq!(names, vec!["about.html", "index.html"]);
    }
}
