//! SEO and markup update pass.
//!
//! Driven entirely by the `[seo.pages]` table: files without a record are
//! silent no-ops. For each configured page, in order:
//!
//! 1. replace the inner `<head>` with the rendered template;
//! 2. strip the leftover template banner comment (when configured);
//! 3. inject JSON-LD structured data before `</head>`;
//! 4. apply the markup fixups (lazy-loading, alt text, dimension units,
//!    heading promotion, footer links, widget scripts, generator tag);
//! 5. write the file back.
//!
//! There is no rollback: a failure between steps leaves the file in
//! whatever partially-updated state the write produced. Each fixup is
//! stateless, so re-running the pass converges rather than compounding.

pub mod fixups;
pub mod head;
pub mod schema;

use crate::config::SiteConfig;
use crate::report::{Outcome, RunReport, SkipReason};
use crate::{report, scan};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid banner_pattern: {0}")]
    BadBannerPattern(#[from] regex::Error),
}

static HEAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<head>(.*?)</head>").unwrap());

/// Update every configured HTML page at the site root.
pub fn run(site_root: &Path, config: &SiteConfig, verbose: bool) -> Result<RunReport, SeoError> {
    // Compile the banner pattern once; a bad pattern is a config error, not
    // a per-file one.
    let banner = config
        .seo
        .banner_pattern
        .as_deref()
        .map(Regex::new)
        .transpose()?;

    let files = scan::collect_html_files(site_root)?;
    let total = files.len();
    if verbose {
        println!("Found {} HTML files", total);
    }

    let mut run = RunReport::new();
    for (i, path) in files.iter().enumerate() {
        let outcome = match process_file(path, config, banner.as_ref()) {
            Ok(outcome) => outcome,
            Err(e) => Outcome::Failed(e.to_string()),
        };
        run.push(scan::display_path(path, site_root), outcome);
        if verbose {
            report::print_item(i + 1, total, run.items.last().unwrap());
        }
    }

    Ok(run)
}

/// Apply the full update sequence to one file.
pub fn process_file(
    path: &Path,
    config: &SiteConfig,
    banner: Option<&Regex>,
) -> Result<Outcome, SeoError> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let Some(page) = config.seo.pages.get(filename) else {
        return Ok(Outcome::Skipped(SkipReason::NotInPagesTable));
    };

    let html = std::fs::read_to_string(path)?;

    let html = replace_head(&html, &head::render_head(page, &config.site, &config.head));

    let html = match banner {
        Some(re) => re.replace_all(&html, "").into_owned(),
        None => html,
    };

    let scripts = schema::structured_data_scripts(filename, page, &config.site, &config.seo);
    let html = if scripts.is_empty() {
        html
    } else {
        html.replacen("</head>", &format!("\n  {scripts}\n</head>"), 1)
    };

    let html = fixups::add_lazy_loading(&html);
    let html = fixups::fix_alt_text(&html, &config.alt_text);
    let html = fixups::fix_dimension_units(&html);
    let html = fixups::promote_header_heading(&html, filename, &config.seo);
    let html = fixups::rewrite_links(&html, &config.seo.link_rewrites);
    let html = fixups::strip_widget_scripts(&html, filename, &config.seo);
    let html = fixups::strip_generator_meta(&html);

    std::fs::write(path, html)?;
    Ok(Outcome::Updated)
}

/// Swap the inner content of the first `<head>…</head>` block. Documents
/// without a head section are left as they are.
fn replace_head(html: &str, new_inner: &str) -> String {
    match HEAD_RE.captures(html) {
        Some(caps) => {
            let inner = caps.get(1).unwrap();
            let mut out = String::with_capacity(html.len() + new_inner.len());
            out.push_str(&html[..inner.start()]);
            out.push_str("\n  ");
            out.push_str(new_inner);
            out.push('\n');
            out.push_str(&html[inner.end()..]);
            out
        }
        None => html.to_string(),
    }
}
