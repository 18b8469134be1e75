//! The rebuilt `<head>` template.
//!
//! The SEO pass throws away whatever the template left in `<head>` and
//! renders a fresh block from the page record and site identity. Rendering
//! goes through maud so interpolated titles and descriptions are escaped —
//! page tables come from config, not from trusted code.

use crate::config::{HeadConfig, PageMeta, SiteInfo};
use maud::html;

const VIEWPORT: &str = "width=device-width, initial-scale=1.0, maximum-scale=5.0";

/// Render the inner content of `<head>` for one page.
pub fn render_head(page: &PageMeta, site: &SiteInfo, head: &HeadConfig) -> String {
    let canonical = page.canonical(site);
    let og_image = site.absolute_url(site.og_image());

    let markup = html! {
        meta charset="utf-8";
        title { (page.title) }
        meta http-equiv="X-UA-Compatible" content="IE=edge";
        meta name="description" content=(page.description);
        meta name="viewport" content=(VIEWPORT);
        @if !site.author().is_empty() {
            meta name="author" content=(site.author());
        }
        link rel="canonical" href=(canonical);
        meta property="og:type" content=(page.og_type);
        meta property="og:url" content=(canonical);
        meta property="og:title" content=(page.title);
        meta property="og:description" content=(page.description);
        meta property="og:image" content=(og_image);
        meta property="og:site_name" content=(site.name);
        meta name="twitter:card" content="summary_large_image";
        meta name="twitter:title" content=(page.title);
        meta name="twitter:description" content=(page.description);
        meta name="twitter:image" content=(og_image);
        @if !site.favicon.is_empty() {
            link rel="shortcut icon" type="image/x-icon" href=(site.favicon);
        }
        @for origin in &head.preconnect {
            link rel="preconnect" href=(origin) crossorigin;
        }
        @for href in &head.stylesheets {
            link rel="stylesheet" href=(href);
        }
    };
    markup.into_string()
}
