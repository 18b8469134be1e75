//! Site configuration.
//!
//! A single optional `config.toml` at the site root. Every value has a
//! compiled-in default matching the behavior the passes had as one-off
//! scripts (thresholds, qualities, fixup targets), so the binary works on a
//! bare tree; the SEO pass only becomes active once a `[seo.pages]` table
//! is configured.
//!
//! The loaded [`SiteConfig`] is immutable and passed into every transform
//! function — no module-level tables — so tests can drive the passes with
//! alternate tables.
//!
//! ```toml
//! # All options are optional - a minimal real-world config:
//!
//! [site]
//! domain = "https://example.com"
//! name = "Example Studio"
//! description = "Photography and print services."
//! logo = "images/logo.png"
//!
//! [head]
//! stylesheets = ["css/style.css"]
//!
//! [seo.pages."index.html"]
//! title = "Example Studio | Photography"
//! description = "Professional photography services."
//! path = "/"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Root configuration, loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity used by the SEO pass (head template, JSON-LD).
    pub site: SiteInfo,
    /// Image pipeline thresholds and qualities.
    pub images: ImagesConfig,
    /// Contents of the rebuilt `<head>` beyond the per-page record.
    pub head: HeadConfig,
    /// Picture-tag rewriter settings.
    pub pictures: PicturesConfig,
    /// SEO pass tables and fixup targets.
    pub seo: SeoConfig,
    /// Alt-text lookup tables for the alt backfill fixup.
    pub alt_text: AltTextConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Absolute origin, no trailing slash (`https://example.com`).
    pub domain: String,
    /// Organization / site name.
    pub name: String,
    /// Organization description for JSON-LD.
    pub description: String,
    /// `<meta name="author">` value; defaults to `name` when empty.
    pub author: String,
    /// Site-relative logo path, used for JSON-LD and as the OG image fallback.
    pub logo: String,
    /// Site-relative favicon path.
    pub favicon: String,
    /// Social profile URLs for the Organization `sameAs` array.
    pub social: Vec<String>,
    /// Site-relative Open Graph image; falls back to `logo`.
    pub og_image: Option<String>,
}

impl SiteInfo {
    pub fn author(&self) -> &str {
        if self.author.is_empty() {
            &self.name
        } else {
            &self.author
        }
    }

    pub fn og_image(&self) -> &str {
        self.og_image.as_deref().unwrap_or(&self.logo)
    }

    /// Absolute URL for a site-relative path (`/about.html` or `images/x.png`).
    pub fn absolute_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.domain, path.trim_start_matches('/'))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Image directory, relative to the site root.
    pub dir: String,
    /// Maximum width; wider sources are downscaled to this.
    pub max_width: u32,
    /// Thumbnail width; post-resize images wider than this get a `-thumb` pair.
    pub thumb_width: u32,
    /// JPEG re-encode quality.
    pub jpeg_quality: u32,
    /// WebP sibling quality.
    pub webp_quality: u32,
    /// Skip sources whose WebP sibling is newer than the source. Without
    /// this guard every run recompresses already-lossy JPEGs again.
    pub skip_optimized: bool,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            dir: "images".to_string(),
            max_width: 1920,
            thumb_width: 800,
            jpeg_quality: 82,
            webp_quality: 80,
            skip_optimized: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeadConfig {
    /// Stylesheet hrefs, emitted in order at the end of the rebuilt head.
    pub stylesheets: Vec<String>,
    /// Origins to emit `<link rel="preconnect">` hints for.
    pub preconnect: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PicturesConfig {
    /// Filenames the rewriter never touches (template leftovers, drafts).
    pub exclude: Vec<String>,
    /// `sizes` attribute emitted alongside a two-candidate srcset.
    pub srcset_sizes: String,
}

impl Default for PicturesConfig {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            srcset_sizes: "(max-width: 768px) 100vw, 25vw".to_string(),
        }
    }
}

/// One footer-link rewrite: swap the href, then relabel the anchor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkRewrite {
    /// Exact href value to replace.
    pub from: String,
    /// Replacement href.
    pub to: String,
    /// New anchor text; empty leaves the label alone.
    pub label: String,
}

/// A service listed in the LocalBusiness offer catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Service {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeoConfig {
    /// The page that gets no breadcrumb trail.
    pub home_page: String,
    /// Page whose URL the Organization contact point links to.
    pub contact_page: String,
    /// Pages that also receive the LocalBusiness schema.
    pub local_business_pages: Vec<String>,
    /// Class of the section whose leading `<h2>` is promoted to `<h1>` on
    /// pages that have none.
    pub header_section_class: String,
    /// Optional regex matching a leftover template banner comment to strip.
    pub banner_pattern: Option<String>,
    /// JSON-LD price range for the LocalBusiness schema.
    pub price_range: String,
    /// Services for the LocalBusiness offer catalog.
    pub services: Vec<Service>,
    /// Script `src` substrings removed from pages not listed in
    /// `remove_scripts_keep_on`.
    pub remove_scripts: Vec<String>,
    pub remove_scripts_keep_on: Vec<String>,
    /// Footer link rewrites, applied in order.
    pub link_rewrites: Vec<LinkRewrite>,
    /// The per-page metadata table; files absent from it are skipped.
    pub pages: BTreeMap<String, PageMeta>,
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            home_page: "index.html".to_string(),
            contact_page: "contact.html".to_string(),
            local_business_pages: vec!["index.html".to_string(), "contact.html".to_string()],
            header_section_class: "single-page-header".to_string(),
            banner_pattern: None,
            price_range: "$$".to_string(),
            services: Vec::new(),
            remove_scripts: Vec::new(),
            remove_scripts_keep_on: vec!["contact.html".to_string()],
            link_rewrites: Vec::new(),
            pages: BTreeMap::new(),
        }
    }
}

/// Per-page SEO record. The canonical URL is `site.domain` + `path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    /// Site-relative canonical path (`/` for the home page).
    pub path: String,
    /// Open Graph type.
    pub og_type: String,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            path: String::new(),
            og_type: "website".to_string(),
        }
    }
}

impl PageMeta {
    pub fn canonical(&self, site: &SiteInfo) -> String {
        format!("{}{}", site.domain, self.path)
    }

    /// Breadcrumb display name: the title up to the first `|` separator.
    pub fn short_title(&self) -> &str {
        self.title.split('|').next().unwrap_or("").trim()
    }
}

/// Alt text applied to images whose src contains a substring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathAlt {
    pub contains: String,
    pub alt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AltTextConfig {
    /// Exact filename → alt text.
    pub files: BTreeMap<String, String>,
    /// Path-substring rules, checked in order after the exact table.
    pub paths: Vec<PathAlt>,
    /// Applied when nothing else matches; empty disables the backfill default.
    pub fallback: String,
}

impl AltTextConfig {
    /// Resolve alt text for an image src: exact filename, then path
    /// substring, then fallback. `None` when nothing applies.
    pub fn alt_for_src(&self, src: &str) -> Option<&str> {
        let filename = src.rsplit('/').next().unwrap_or(src);
        if let Some(alt) = self.files.get(filename) {
            return Some(alt);
        }
        for rule in &self.paths {
            if src.contains(&rule.contains) {
                return Some(&rule.alt);
            }
        }
        if self.fallback.is_empty() {
            None
        } else {
            Some(&self.fallback)
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, q) in [
            ("images.jpeg_quality", self.images.jpeg_quality),
            ("images.webp_quality", self.images.webp_quality),
        ] {
            if !(1..=100).contains(&q) {
                return Err(ConfigError::Validation(format!("{name} must be 1-100")));
            }
        }
        if self.images.thumb_width == 0 {
            return Err(ConfigError::Validation(
                "images.thumb_width must be non-zero".into(),
            ));
        }
        if self.images.thumb_width >= self.images.max_width {
            return Err(ConfigError::Validation(
                "images.thumb_width must be smaller than images.max_width".into(),
            ));
        }
        if !self.seo.pages.is_empty() {
            if self.site.domain.is_empty() {
                return Err(ConfigError::Validation(
                    "site.domain is required when [seo.pages] is configured".into(),
                ));
            }
            for (file, page) in &self.seo.pages {
                if !page.path.starts_with('/') {
                    return Err(ConfigError::Validation(format!(
                        "seo.pages.\"{file}\".path must start with '/'"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Load `config.toml` from the given path; compiled-in defaults apply when
/// the file doesn't exist.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    if !path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: SiteConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Stock `config.toml` with every option documented, printed by the
/// `gen-config` subcommand. Parsing it back yields the defaults.
pub fn stock_config_toml() -> String {
    r##"# sitefix configuration. Every value shown is the default; delete
# anything you don't need to override.

[site]
# Absolute origin, no trailing slash. Required once [seo.pages] is set.
domain = ""
name = ""
description = ""
# Defaults to site.name when empty.
author = ""
# Site-relative paths.
logo = ""
favicon = ""
# Social profile URLs for JSON-LD sameAs.
social = []
# Open Graph image; falls back to logo.
# og_image = "images/og.jpg"

[images]
dir = "images"
max_width = 1920
thumb_width = 800
jpeg_quality = 82
webp_quality = 80
# Skip files whose .webp sibling is newer than the source (pass --force
# to re-encode everything).
skip_optimized = true

[head]
# Stylesheets emitted at the end of the rebuilt <head>, in order.
stylesheets = []
# Origins to preconnect to, e.g. ["https://fonts.googleapis.com"]
preconnect = []

[pictures]
# Filenames the picture rewriter never touches.
exclude = []
srcset_sizes = "(max-width: 768px) 100vw, 25vw"

[seo]
home_page = "index.html"
contact_page = "contact.html"
# Pages that also get the LocalBusiness schema.
local_business_pages = ["index.html", "contact.html"]
# Section class whose leading <h2> is promoted to <h1> on pages without one.
header_section_class = "single-page-header"
# Regex for a leftover template banner comment to strip.
# banner_pattern = '<!--\s*theme banner.*?-->\s*\n'
price_range = "$$"
# Script src substrings removed everywhere except remove_scripts_keep_on.
remove_scripts = []
remove_scripts_keep_on = ["contact.html"]

# Services listed in the LocalBusiness offer catalog:
# [[seo.services]]
# name = "Professional Photography"
# description = "Portrait, event, and lifestyle photography."

# Footer link rewrites, applied in order:
# [[seo.link_rewrites]]
# from = "https://www.facebook.com/old-template-account/"
# to = "https://www.instagram.com/studio/"
# label = "Instagram"

# Per-page metadata. Files absent from this table are skipped by the seo pass.
# [seo.pages."index.html"]
# title = "Example Studio | Photography"
# description = "Professional photography services."
# path = "/"
# og_type = "website"

[alt_text]
# Exact filename -> alt text.
# files = { "logo.png" = "Example Studio logo" }
files = {}
# Path-substring rules, checked in order:
# [[alt_text.paths]]
# contains = "gallery/"
# alt = "Example Studio gallery"
# Used when nothing matches; empty disables the default.
fallback = ""
"##
    .to_string()
}
