//! # sitefix
//!
//! One-shot maintenance passes for a small static site. The filesystem is
//! the data store: images live under a subdirectory of the site root, HTML
//! pages sit at the root, and derivatives are found by naming convention —
//! no manifest, no database.
//!
//! # The Three Passes
//!
//! ```text
//! 1. optimize   images/   → resized originals + .webp / -thumb derivatives
//! 2. pictures   *.html    → <img> wrapped in <picture> with WebP sources
//! 3. seo        *.html    → rebuilt <head>, JSON-LD, markup fixups
//! ```
//!
//! Running them in that order is an operational convention, not a contract:
//! the picture rewriter only upgrades an `<img>` whose WebP sibling already
//! exists on disk, so it naturally follows the optimizer, but no pass calls
//! another.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`optimize`] | Batch image optimization driver |
//! | [`pictures`] | `<img>` → `<picture>` rewriter |
//! | [`seo`] | Head rebuild, JSON-LD injection, markup fixups |
//! | [`imaging`] | Backend trait + pure-Rust decode/resize/encode |
//! | [`config`] | `config.toml` loading, defaults, validation |
//! | [`naming`] | Derivative filename convention (`.webp`, `-thumb`) |
//! | [`scan`] | Candidate discovery (image walk, HTML listing) |
//! | [`html`] | Tag-level attribute parsing and re-serialization |
//! | [`report`] | Per-item outcomes, run summaries, console formatting |
//!
//! # Design Decisions
//!
//! ## Derivatives as State
//!
//! There is no cache manifest or marker file. A WebP sibling newer than its
//! source *is* the already-optimized marker; the `-thumb` stem suffix *is*
//! the thumbnail marker. Deleting a derivative re-enables the work that
//! produces it, which is exactly the mental model someone maintaining a
//! static site already has.
//!
//! ## Per-File Failure, Whole-Run Success
//!
//! A corrupt image or unreadable page fails that item only. Outcomes are
//! collected as data ([`report::Outcome`]) and rendered at the end, so a
//! batch over a messy tree completes and tells you what it couldn't do.
//! The only fatal error is a missing image directory.
//!
//! ## Config Tables Over Constants
//!
//! The per-page metadata, alt-text lookups, and fixup targets all live in
//! `config.toml` and travel through an immutable [`config::SiteConfig`]
//! passed into the transforms. Tests inject alternate tables; nothing reads
//! module-level state.
//!
//! ## Tag-Level HTML Patching
//!
//! The HTML passes patch ad hoc template markup, not well-formed documents.
//! Regexes locate tags; located tags are parsed into an attribute list,
//! mutated structurally, and re-serialized ([`html::Tag`]). Whole-document
//! tree parsing is deliberately avoided — every transform is tag-local or
//! anchored on `<head>`.

pub mod config;
pub mod html;
pub mod imaging;
pub mod naming;
pub mod optimize;
pub mod pictures;
pub mod report;
pub mod scan;
pub mod seo;

#[cfg(test)]
pub(crate) mod test_helpers;
