//! Per-item outcomes and console output for all three passes.
//!
//! Failures are collected as data, not printed ad hoc: each processed file
//! produces an [`Outcome`], the batch accumulates them into a [`RunReport`],
//! and rendering happens separately. Each pass has pure `format_*` functions
//! (returning strings, no I/O) with thin `print_*` wrappers, so output is
//! testable and the drivers stay quiet in tests.

use std::fmt;

/// Why a file was intentionally left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// WebP sibling is newer than the source.
    AlreadyOptimized,
    /// File already contains a `<picture>` element.
    AlreadyHasPicture,
    /// File has no record in the `[seo.pages]` table.
    NotInPagesTable,
    /// File is listed in `pictures.exclude`.
    Excluded,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::AlreadyOptimized => "already optimized",
            SkipReason::AlreadyHasPicture => "already has <picture> elements",
            SkipReason::NotInPagesTable => "not in the pages table",
            SkipReason::Excluded => "excluded by config",
        };
        f.write_str(text)
    }
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Optimizer: the file was re-encoded (and possibly resized).
    Optimized {
        original_bytes: u64,
        final_bytes: u64,
        width: u32,
        height: u32,
        thumbnailed: bool,
    },
    /// Picture rewriter: this many `<img>` tags were wrapped.
    Rewritten { images: usize },
    /// SEO pass: the file was rewritten.
    Updated,
    /// Picture rewriter: no tag qualified; file untouched.
    Unchanged,
    /// Intentional no-op.
    Skipped(SkipReason),
    /// Per-file recoverable failure; the batch continued.
    Failed(String),
}

/// One file's report entry. `path` is site-root-relative for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemReport {
    pub path: String,
    pub outcome: Outcome,
}

/// Ordered outcomes plus aggregate counters for one pass invocation.
/// Discarded on exit — the summary block is the only artifact.
#[derive(Debug, Default)]
pub struct RunReport {
    pub items: Vec<ItemReport>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: String, outcome: Outcome) {
        self.items.push(ItemReport { path, outcome });
    }

    /// Files actually transformed (or confirmed unchanged after inspection).
    pub fn processed(&self) -> usize {
        self.items
            .iter()
            .filter(|i| {
                matches!(
                    i.outcome,
                    Outcome::Optimized { .. }
                        | Outcome::Rewritten { .. }
                        | Outcome::Updated
                        | Outcome::Unchanged
                )
            })
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i.outcome, Outcome::Skipped(_)))
            .count()
    }

    pub fn errors(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i.outcome, Outcome::Failed(_)))
            .count()
    }

    pub fn original_bytes(&self) -> u64 {
        self.items
            .iter()
            .filter_map(|i| match i.outcome {
                Outcome::Optimized { original_bytes, .. } => Some(original_bytes),
                _ => None,
            })
            .sum()
    }

    pub fn final_bytes(&self) -> u64 {
        self.items
            .iter()
            .filter_map(|i| match i.outcome {
                Outcome::Optimized { final_bytes, .. } => Some(final_bytes),
                _ => None,
            })
            .sum()
    }
}

fn kb(bytes: u64) -> u64 {
    bytes / 1024
}

fn mb(bytes: u64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}

/// Percent saved relative to the original size; 0 for empty originals.
fn percent_saved(original: u64, optimized: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (original as i64 - optimized as i64) as f64 / original as f64 * 100.0
}

/// Format one item's progress lines: a `[i/total] path` header plus an
/// indented outcome line.
pub fn format_item(index: usize, total: usize, item: &ItemReport) -> Vec<String> {
    let header = format!("[{}/{}] {}", index, total, item.path);
    let detail = match &item.outcome {
        Outcome::Optimized {
            original_bytes,
            final_bytes,
            width,
            height,
            thumbnailed,
        } => {
            let thumbs = if *thumbnailed { ", thumbnails" } else { "" };
            format!(
                "  OK: {}KB -> {}KB ({:+.0}%), {}x{}{}",
                kb(*original_bytes),
                kb(*final_bytes),
                -percent_saved(*original_bytes, *final_bytes),
                width,
                height,
                thumbs
            )
        }
        Outcome::Rewritten { images } => {
            format!("  DONE: {} images wrapped in <picture>", images)
        }
        Outcome::Updated => "  DONE".to_string(),
        Outcome::Unchanged => "  NOCHANGE".to_string(),
        Outcome::Skipped(reason) => format!("  SKIP: {}", reason),
        Outcome::Failed(message) => format!("  ERROR: {}", message),
    };
    vec![header, detail]
}

/// Format the final summary block for a pass.
pub fn format_summary(title: &str, report: &RunReport) -> Vec<String> {
    let mut lines = vec![
        format!("{} complete", title),
        format!("  Processed: {}", report.processed()),
        format!("  Skipped:   {}", report.skipped()),
        format!("  Errors:    {}", report.errors()),
    ];

    let original = report.original_bytes();
    if original > 0 {
        let optimized = report.final_bytes();
        let saved = original.saturating_sub(optimized);
        lines.push(format!("  Original total:  {:.1} MB", mb(original)));
        lines.push(format!("  Optimized total: {:.1} MB", mb(optimized)));
        lines.push(format!(
            "  Saved:           {:.1} MB ({:.1}%)",
            mb(saved),
            percent_saved(original, optimized)
        ));
    }
    lines
}

pub fn print_item(index: usize, total: usize, item: &ItemReport) {
    for line in format_item(index, total, item) {
        println!("{}", line);
    }
}

pub fn print_summary(title: &str, report: &RunReport) {
    println!();
    for line in format_summary(title, report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn optimized(original: u64, optimized: u64) -> Outcome {
        Outcome::Optimized {
            original_bytes: original,
            final_bytes: optimized,
            width: 1920,
            height: 1280,
            thumbnailed: true,
        }
    }

    #[test]
    fn counters_partition_outcomes() {
        let mut report = RunReport::new();
        report.push("a.jpg".into(), optimized(2048, 1024));
        report.push("b.jpg".into(), Outcome::Skipped(SkipReason::AlreadyOptimized));
        report.push("c.jpg".into(), Outcome::Failed("decode error".into()));
        report.push("d.html".into(), Outcome::Rewritten { images: 3 });
        report.push("e.html".into(), Outcome::Unchanged);

        assert_eq!(report.processed(), 3);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.errors(), 1);
        assert_eq!(report.original_bytes(), 2048);
        assert_eq!(report.final_bytes(), 1024);
    }

    #[test]
    fn item_lines_for_optimized_file() {
        let item = ItemReport {
            path: "images/hero.jpg".into(),
            outcome: optimized(200 * 1024, 100 * 1024),
        };
        let lines = format_item(3, 17, &item);
        assert_eq!(lines[0], "[3/17] images/hero.jpg");
        assert_eq!(lines[1], "  OK: 200KB -> 100KB (-50%), 1920x1280, thumbnails");
    }

    #[test]
    fn item_line_for_error() {
        let item = ItemReport {
            path: "images/broken.jpg".into(),
            outcome: Outcome::Failed("Failed to decode".into()),
        };
        assert_eq!(format_item(1, 1, &item)[1], "  ERROR: Failed to decode");
    }

    #[test]
    fn item_line_for_skip() {
        let item = ItemReport {
            path: "index.html".into(),
            outcome: Outcome::Skipped(SkipReason::NotInPagesTable),
        };
        assert_eq!(format_item(1, 2, &item)[1], "  SKIP: not in the pages table");
    }

    #[test]
    fn summary_includes_byte_totals_only_when_present() {
        let mut report = RunReport::new();
        report.push("a.html".into(), Outcome::Updated);
        let lines = format_summary("SEO update", &report);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "SEO update complete");
        assert_eq!(lines[1], "  Processed: 1");

        let mut report = RunReport::new();
        report.push("a.jpg".into(), optimized(4 * 1024 * 1024, 1024 * 1024));
        let lines = format_summary("Optimization", &report);
        assert!(lines.iter().any(|l| l.contains("Original total:  4.0 MB")));
        assert!(lines.iter().any(|l| l.contains("Saved:           3.0 MB (75.0%)")));
    }
}
