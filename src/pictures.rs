//! Picture-tag rewriter.
//!
//! Upgrades `<img>` tags to `<picture>` elements offering the WebP variant,
//! but only when the derivative is confirmed present on disk — the markup
//! never promises a file the optimizer didn't write. When the thumbnail
//! WebP also exists the `<source>` gets a two-candidate `srcset` with the
//! configured breakpoint hints.
//!
//! A file that already contains any `<picture>` element is skipped whole.
//! This is a coarse idempotence guard: it prevents double-wrapping on
//! re-runs, at the cost of never upgrading images added to a file after its
//! first rewrite.

use crate::config::{ImagesConfig, PicturesConfig, SiteConfig};
use crate::html::{IMG_TAG_RE, Tag};
use crate::report::{Outcome, RunReport, SkipReason};
use crate::{naming, report, scan};
use maud::{PreEscaped, html};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rewrite every HTML file at the site root.
pub fn run(site_root: &Path, config: &SiteConfig, verbose: bool) -> Result<RunReport, RewriteError> {
    let files = scan::collect_html_files(site_root)?;
    let total = files.len();
    if verbose {
        println!("Found {} HTML files", total);
    }

    let mut run = RunReport::new();
    for (i, path) in files.iter().enumerate() {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let outcome = if config.pictures.exclude.iter().any(|e| e == filename) {
            Outcome::Skipped(SkipReason::Excluded)
        } else {
            match rewrite_file(path, site_root, config) {
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

/// Rewrite one file; writes it back only when at least one tag changed.
pub fn rewrite_file(
    path: &Path,
    site_root: &Path,
    config: &SiteConfig,
) -> Result<Outcome, RewriteError> {
    let html = std::fs::read_to_string(path)?;

    if html.contains("<picture") {
        return Ok(Outcome::Skipped(SkipReason::AlreadyHasPicture));
    }

    let (rewritten, images) =
        rewrite_picture_tags(&html, site_root, &config.images, &config.pictures);
    if images == 0 {
        return Ok(Outcome::Unchanged);
    }

    std::fs::write(path, rewritten)?;
    Ok(Outcome::Rewritten { images })
}

/// Wrap qualifying `<img>` tags in `<picture>` elements. Returns the new
/// text and the number of tags wrapped.
pub fn rewrite_picture_tags(
    html: &str,
    site_root: &Path,
    images: &ImagesConfig,
    pictures: &PicturesConfig,
) -> (String, usize) {
    let mut count = 0;
    let rewritten = IMG_TAG_RE.replace_all(html, |caps: &regex::Captures| {
        let tag_text = caps.get(0).unwrap().as_str();
        match wrap_in_picture(tag_text, site_root, images, pictures) {
            Some(picture) => {
                count += 1;
                picture
            }
            None => tag_text.to_string(),
        }
    });
    (rewritten.into_owned(), count)
}

/// Build the `<picture>` element for one `<img>` tag, or `None` when the
/// tag doesn't qualify (no src, unsupported type, WebP missing on disk).
fn wrap_in_picture(
    tag_text: &str,
    site_root: &Path,
    images: &ImagesConfig,
    pictures: &PicturesConfig,
) -> Option<String> {
    let tag = Tag::parse(tag_text)?;
    let src = tag.attr("src")?;

    let webp = naming::webp_src(src)?;
    if !derivative_exists(site_root, &webp) {
        return None;
    }

    // Two-candidate srcset with breakpoint hints when the thumbnail WebP
    // exists, single candidate otherwise.
    let thumb_webp = naming::thumb_webp_src(src).filter(|t| derivative_exists(site_root, t));
    let (srcset, sizes) = match thumb_webp {
        Some(thumb) => (
            format!(
                "{} {}w, {} {}w",
                thumb, images.thumb_width, webp, images.max_width
            ),
            Some(pictures.srcset_sizes.as_str()),
        ),
        None => (webp, None),
    };

    let markup = html! {
        picture {
            source type="image/webp" srcset=(srcset) sizes=[sizes];
            (PreEscaped(tag_text))
        }
    };
    Some(markup.into_string())
}

/// Whether a site-relative derivative path exists on disk.
fn derivative_exists(site_root: &Path, src: &str) -> bool {
    site_root.join(src.trim_start_matches('/')).exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::fs;
    use tempfile::TempDir;

    fn site_with(files: &[&str]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for file in files {
            let path = tmp.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "x").unwrap();
        }
        tmp
    }

    fn rewrite(html: &str, site: &TempDir) -> (String, usize) {
        let config = SiteConfig::default();
        rewrite_picture_tags(html, site.path(), &config.images, &config.pictures)
    }

    #[test]
    fn wraps_img_with_single_candidate_when_no_thumb() {
        let site = site_with(&["images/a.jpg", "images/a.webp"]);
        let html = r#"<div><img src="images/a.jpg" alt="A"></div>"#;
        let (out, count) = rewrite(html, &site);

        assert_eq!(count, 1);
        assert_eq!(
            out,
            "<div><picture><source type=\"image/webp\" srcset=\"images/a.webp\">\
             <img src=\"images/a.jpg\" alt=\"A\"></picture></div>"
        );
    }

    #[test]
    fn wraps_img_with_responsive_srcset_when_thumb_exists() {
        let site = site_with(&[
            "images/a.jpg",
            "images/a.webp",
            "images/a-thumb.jpg",
            "images/a-thumb.webp",
        ]);
        let html = r#"<img src="images/a.jpg" alt="A">"#;
        let (out, count) = rewrite(html, &site);

        assert_eq!(count, 1);
        assert!(out.contains(
            "srcset=\"images/a-thumb.webp 800w, images/a.webp 1920w\" \
             sizes=\"(max-width: 768px) 100vw, 25vw\""
        ));
    }

    #[test]
    fn leaves_img_without_webp_sibling() {
        let site = site_with(&["images/a.jpg"]);
        let html = r#"<img src="images/a.jpg" alt="A">"#;
        let (out, count) = rewrite(html, &site);
        assert_eq!(count, 0);
        assert_eq!(out, html);
    }

    #[test]
    fn leaves_unsupported_and_srcless_tags() {
        let site = site_with(&["images/logo.webp"]);
        let html = r#"<img src="images/logo.svg"><img data-src="images/a.jpg">"#;
        let (out, count) = rewrite(html, &site);
        assert_eq!(count, 0);
        assert_eq!(out, html);
    }

    #[test]
    fn root_relative_src_resolves_against_site_root() {
        let site = site_with(&["images/a.jpg", "images/a.webp"]);
        let html = r#"<img src="/images/a.jpg">"#;
        let (_, count) = rewrite(html, &site);
        assert_eq!(count, 1);
    }

    #[test]
    fn file_with_picture_is_left_byte_identical() {
        let site = site_with(&["images/a.jpg", "images/a.webp"]);
        let page = site.path().join("index.html");
        let original =
            "<picture><source srcset=\"x.webp\"><img src=\"x.jpg\"></picture>\n<img src=\"images/a.jpg\">";
        fs::write(&page, original).unwrap();

        let outcome = rewrite_file(&page, site.path(), &SiteConfig::default()).unwrap();
        assert_eq!(outcome, Outcome::Skipped(SkipReason::AlreadyHasPicture));
        assert_eq!(fs::read_to_string(&page).unwrap(), original);
    }

    #[test]
    fn run_reports_excluded_and_unchanged_files() {
        let site = site_with(&["images/a.jpg", "images/a.webp"]);
        fs::write(
            site.path().join("gallery.html"),
            r#"<img src="images/a.jpg">"#,
        )
        .unwrap();
        fs::write(site.path().join("draft.html"), r#"<img src="images/a.jpg">"#).unwrap();
        fs::write(site.path().join("plain.html"), "<p>no images</p>").unwrap();

        let mut config = SiteConfig::default();
        config.pictures.exclude = vec!["draft.html".to_string()];

        let run = run(site.path(), &config, false).unwrap();
        let by_path: std::collections::BTreeMap<_, _> = run
            .items
            .iter()
            .map(|i| (i.path.as_str(), i.outcome.clone()))
            .collect();

        assert_eq!(by_path["gallery.html"], Outcome::Rewritten { images: 1 });
        assert_eq!(
            by_path["draft.html"],
            Outcome::Skipped(SkipReason::Excluded)
        );
        assert_eq!(by_path["plain.html"], Outcome::Unchanged);

        // The rewritten file now carries the picture element on disk.
        let gallery = fs::read_to_string(site.path().join("gallery.html")).unwrap();
        assert!(gallery.contains("<picture>"));
        assert!(gallery.contains("type=\"image/webp\""));
    }
}
