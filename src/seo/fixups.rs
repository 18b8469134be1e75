//! Stateless markup fixups.
//!
//! Each function takes HTML text and returns HTML text; none of them carry
//! state between calls. They run in a fixed sequence from
//! [`super::process_file`] — order matters only in that later fixups assume
//! earlier ones already ran (alt backfill sees the lazy-loading attribute,
//! label rewrites see the new hrefs).

use crate::config::{AltTextConfig, LinkRewrite, SeoConfig};
use crate::html::{IMG_TAG_RE, Tag};
use regex::Regex;
use std::sync::LazyLock;

static WIDTH_VW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"width\s*=\s*"(\d+)vw""#).unwrap());
static HEIGHT_VH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"height\s*=\s*"(\d+)vh""#).unwrap());
static GENERATOR_META_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[ \t]*<meta name="generator"[^>]*>[ \t]*\r?\n?"#).unwrap());
static H1_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<h1[\s>]").unwrap());

/// Add `loading="lazy"` to every `<img>` that doesn't declare a loading
/// behavior already.
pub fn add_lazy_loading(html: &str) -> String {
    rewrite_img_tags(html, |tag| {
        if !tag.has_attr("loading") {
            tag.set_attr("loading", "lazy");
        }
    })
}

/// Backfill empty or missing `alt` attributes from the lookup tables.
/// Images with no table match (and no configured fallback) are left alone.
pub fn fix_alt_text(html: &str, alt_text: &AltTextConfig) -> String {
    rewrite_img_tags(html, |tag| {
        let Some(src) = tag.attr("src").map(str::to_string) else {
            return;
        };
        if tag.attr("alt").is_some_and(|alt| !alt.is_empty()) {
            return;
        }
        if let Some(alt) = alt_text.alt_for_src(&src) {
            let alt = alt.to_string();
            tag.set_attr("alt", &alt);
        }
    })
}

/// Strip viewport units from numeric image dimensions: the template left
/// `width="250vw" height="75vh"` on logos, which is invalid for the
/// attribute form (attributes take plain pixel integers).
pub fn fix_dimension_units(html: &str) -> String {
    let html = WIDTH_VW_RE.replace_all(html, r#"width="${1}""#);
    HEIGHT_VH_RE.replace_all(&html, r#"height="${1}""#).into_owned()
}

/// On pages with no `<h1>`, promote the first `<h2>` inside the header
/// section to `<h1>`. The home page is left alone — its slider headings
/// are structured differently.
pub fn promote_header_heading(html: &str, filename: &str, seo: &SeoConfig) -> String {
    if filename == seo.home_page || H1_RE.is_match(html) {
        return html.to_string();
    }
    let pattern = format!(
        r#"(?s)(<section class="{}">.*?)<h2>(.*?)</h2>"#,
        regex::escape(&seo.header_section_class)
    );
    let re = Regex::new(&pattern).expect("escaped class name forms a valid pattern");
    re.replace(html, "${1}<h1>${2}</h1>").into_owned()
}

/// Apply footer link rewrites: swap each configured href, then relabel the
/// anchors now pointing at the new target.
pub fn rewrite_links(html: &str, rewrites: &[LinkRewrite]) -> String {
    let mut html = html.to_string();
    for rewrite in rewrites {
        html = html.replace(
            &format!("href=\"{}\"", rewrite.from),
            &format!("href=\"{}\"", rewrite.to),
        );
        if !rewrite.label.is_empty() {
            let anchor = Regex::new(&format!(
                r#"(<a href="{}"[^>]*>)[^<]*(</a>)"#,
                regex::escape(&rewrite.to)
            ))
            .expect("escaped href forms a valid pattern");
            html = anchor
                .replace_all(&html, format!("${{1}}{}${{2}}", rewrite.label).as_str())
                .into_owned();
        }
    }
    html
}

/// Remove configured widget scripts from pages that don't use them.
pub fn strip_widget_scripts(html: &str, filename: &str, seo: &SeoConfig) -> String {
    if seo.remove_scripts_keep_on.iter().any(|p| p == filename) {
        return html.to_string();
    }
    let mut html = html.to_string();
    for fragment in &seo.remove_scripts {
        let re = Regex::new(&format!(
            r#"[ \t]*<script src="[^"]*{}[^"]*"></script>[ \t]*\r?\n?"#,
            regex::escape(fragment)
        ))
        .expect("escaped fragment forms a valid pattern");
        html = re.replace_all(&html, "").into_owned();
    }
    html
}

/// Remove any leftover `<meta name="generator">` tag.
pub fn strip_generator_meta(html: &str) -> String {
    GENERATOR_META_RE.replace_all(html, "").into_owned()
}

/// Rewrite every `<img>` tag through a mutation closure; tags the closure
/// leaves untouched are re-emitted verbatim.
fn rewrite_img_tags(html: &str, mutate: impl Fn(&mut Tag)) -> String {
    IMG_TAG_RE
        .replace_all(html, |caps: &regex::Captures| {
            let text = caps.get(0).unwrap().as_str();
            let Some(mut tag) = Tag::parse(text) else {
                return text.to_string();
            };
            let before = tag.clone();
            mutate(&mut tag);
            if tag == before {
                text.to_string()
            } else {
                tag.render()
            }
        })
        .into_owned()
}
