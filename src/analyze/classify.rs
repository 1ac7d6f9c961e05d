//! Heading classification: shared pre-filters plus pluggable policies.
//!
//! The pre-filters throw out text that is never a heading regardless of
//! typography (margin bands, bare numbers, URLs, tabular residue). The
//! policy then decides heading-or-not from font weight and size, and
//! assigns a level. Two policies exist: the statistical outlier test
//! against document-wide size statistics, and fixed multipliers of the
//! page-local average size.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ExtractOptions;
use crate::model::{HeadingBlock, HeadingLevel};

use super::stats::SizeStatistics;

/// URLs and bare domains.
static URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(https?://\S+|www\.\S+|\S+\.com\b)").unwrap());

/// Purely non-word symbols.
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\W+$").unwrap());

/// Numbered list markers with nothing else, e.g. "1. 2. 3." or "4)".
static NUMBER_MARKERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+[.)-]?\s*)+$").unwrap());

/// Serial-number header lines, e.g. "S.No 1 2 3".
static SERIAL_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(S\.?\s?No\.?)((\s+\d+\.*)+)$").unwrap());

/// Runs of compact numbered markers, e.g. "1.2)3-".
static MARKER_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,2}(?:\.|\)|-))+\s*$").unwrap());

/// Everything a policy needs besides the block itself.
pub struct ClassifyContext<'a> {
    /// Document-wide size statistics.
    pub stats: &'a SizeStatistics,
    /// Height of the page the block sits on.
    pub page_height: f32,
    /// Average word size on that page.
    pub page_avg_size: f32,
    /// Whether the document's detected language uses Latin script.
    pub latin_script: bool,
    pub options: &'a ExtractOptions,
}

/// Shared pre-filters applied before any policy runs.
///
/// Rejects blocks in the header/footer margin bands, and text shapes that
/// are never headings. Word-boundary heuristics don't transfer to
/// non-Latin scripts, so those only get a loose length bound.
pub fn passes_prefilters(block: &HeadingBlock, ctx: &ClassifyContext) -> bool {
    let options = ctx.options;
    if block.y < ctx.page_height * options.top_margin
        || block.y > ctx.page_height * options.bottom_margin
    {
        return false;
    }

    let text = block.text.trim();

    if !ctx.latin_script {
        let chars = text.chars().count();
        return (2..=200).contains(&chars);
    }

    if text.chars().count() < 3 {
        return false;
    }
    if NON_WORD.is_match(text) {
        return false;
    }
    if !text.is_empty() && text.chars().all(|c| c.is_numeric()) {
        return false;
    }
    if URL.is_match(text) {
        return false;
    }
    if NUMBER_MARKERS.is_match(text) || MARKER_RUN.is_match(text) || SERIAL_LINE.is_match(text) {
        return false;
    }

    // Three or more purely numeric tokens is tabular residue.
    let numeric_tokens = text
        .split_whitespace()
        .filter(|token| {
            let stripped = token.trim_matches('.');
            !stripped.is_empty() && stripped.chars().all(|c| c.is_numeric())
        })
        .count();
    if numeric_tokens >= 3 {
        return false;
    }

    true
}

/// A heading classification policy: decides whether a pre-filtered block
/// is a heading and, if so, at what level.
pub trait ClassifyPolicy {
    fn classify(&self, block: &HeadingBlock, ctx: &ClassifyContext) -> Option<HeadingLevel>;
}

/// Statistical policy: a block is a heading when its font is bold or its
/// size is an outlier above `mean + threshold_factor × stdev`. Levels
/// follow the block size's rank among the document's distinct sizes.
#[derive(Debug, Default)]
pub struct OutlierPolicy;

impl ClassifyPolicy for OutlierPolicy {
    fn classify(&self, block: &HeadingBlock, ctx: &ClassifyContext) -> Option<HeadingLevel> {
        let qualifies = block.is_bold()
            || ctx
                .stats
                .is_outlier(block.size, ctx.options.threshold_factor);
        if !qualifies {
            return None;
        }
        Some(HeadingLevel::from_rank(ctx.stats.rank_of(block.size)))
    }
}

/// Fixed-ratio policy: multipliers of the page-local average size.
#[derive(Debug)]
pub struct FixedRatioPolicy {
    /// Minimum size ratio for a non-bold block to qualify at all.
    pub min_ratio: f32,
    /// Ratio above which a heading is H2.
    pub h2_ratio: f32,
    /// Ratio above which a heading is H1.
    pub h1_ratio: f32,
}

impl Default for FixedRatioPolicy {
    fn default() -> Self {
        Self {
            min_ratio: 1.2,
            h2_ratio: 1.5,
            h1_ratio: 1.8,
        }
    }
}

impl ClassifyPolicy for FixedRatioPolicy {
    fn classify(&self, block: &HeadingBlock, ctx: &ClassifyContext) -> Option<HeadingLevel> {
        if ctx.page_avg_size <= 0.0 {
            return None;
        }
        let ratio = block.size / ctx.page_avg_size;
        let qualifies = block.is_bold() || ratio >= self.min_ratio;
        if !qualifies {
            return None;
        }

        let level = if ratio > self.h1_ratio {
            HeadingLevel::H1
        } else if ratio > self.h2_ratio {
            HeadingLevel::H2
        } else if ratio > self.min_ratio {
            HeadingLevel::H3
        } else {
            HeadingLevel::H4
        };
        Some(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(text: &str, font: &str, size: f32, y: f32) -> HeadingBlock {
        HeadingBlock {
            text: text.to_string(),
            font_name: font.to_string(),
            size,
            y,
            page: 1,
            x0: 50.0,
            x1: 300.0,
        }
    }

    fn ctx<'a>(
        stats: &'a SizeStatistics,
        options: &'a ExtractOptions,
        latin: bool,
    ) -> ClassifyContext<'a> {
        ClassifyContext {
            stats,
            page_height: 792.0,
            page_avg_size: 12.0,
            latin_script: latin,
            options,
        }
    }

    #[test]
    fn test_margin_bands_rejected() {
        let stats = SizeStatistics::from_sizes(&[12.0, 24.0]);
        let options = ExtractOptions::default();
        let c = ctx(&stats, &options, true);

        // Top 10% band
        assert!(!passes_prefilters(&block("Header", "F", 12.0, 70.0), &c));
        // Bottom 5% band
        assert!(!passes_prefilters(&block("Footer", "F", 12.0, 760.0), &c));
        // Mid page passes
        assert!(passes_prefilters(&block("Middle", "F", 12.0, 400.0), &c));
    }

    #[test]
    fn test_latin_text_shape_rejections() {
        let stats = SizeStatistics::from_sizes(&[12.0]);
        let options = ExtractOptions::default();
        let c = ctx(&stats, &options, true);

        assert!(!passes_prefilters(&block("ab", "F", 12.0, 400.0), &c));
        // Character count, not byte length: "Ré" is three bytes.
        assert!(!passes_prefilters(&block("Ré", "F", 12.0, 400.0), &c));
        assert!(!passes_prefilters(&block("###", "F", 12.0, 400.0), &c));
        assert!(!passes_prefilters(&block("12345", "F", 12.0, 400.0), &c));
        assert!(!passes_prefilters(
            &block("see https://example.org/x", "F", 12.0, 400.0),
            &c
        ));
        assert!(!passes_prefilters(
            &block("visit www.example.org", "F", 12.0, 400.0),
            &c
        ));
        assert!(!passes_prefilters(&block("1. 2. 3.", "F", 12.0, 400.0), &c));
        assert!(!passes_prefilters(&block("1.2)3-", "F", 12.0, 400.0), &c));
        assert!(!passes_prefilters(
            &block("S.No 1 2 3", "F", 12.0, 400.0),
            &c
        ));
        // Tabular residue: three numeric tokens
        assert!(!passes_prefilters(
            &block("Totals 10 20 30", "F", 12.0, 400.0),
            &c
        ));
        // Two numeric tokens is fine
        assert!(passes_prefilters(
            &block("Revenue 2023 2024", "F", 12.0, 400.0),
            &c
        ));
    }

    #[test]
    fn test_non_latin_length_bounds() {
        let stats = SizeStatistics::from_sizes(&[12.0]);
        let options = ExtractOptions::default();
        let c = ctx(&stats, &options, false);

        assert!(passes_prefilters(&block("مق", "F", 12.0, 400.0), &c));
        assert!(!passes_prefilters(&block("م", "F", 12.0, 400.0), &c));
        let long = "م".repeat(201);
        assert!(!passes_prefilters(&block(&long, "F", 12.0, 400.0), &c));
    }

    #[test]
    fn test_outlier_policy_bold_qualifies() {
        let stats = SizeStatistics::from_sizes(&[12.0, 12.0, 12.0]);
        let options = ExtractOptions::default();
        let c = ctx(&stats, &options, true);

        let b = block("Overview", "Helvetica-Bold", 12.0, 400.0);
        // stdev is 0 so only boldness can qualify.
        assert_eq!(
            OutlierPolicy.classify(&b, &c),
            Some(HeadingLevel::H1)
        );

        let plain = block("Overview", "Helvetica", 12.0, 400.0);
        assert_eq!(OutlierPolicy.classify(&plain, &c), None);
    }

    #[test]
    fn test_outlier_policy_size_outlier_qualifies() {
        let mut sizes = vec![12.0; 40];
        sizes.extend([24.0, 18.0]);
        let stats = SizeStatistics::from_sizes(&sizes);
        let options = ExtractOptions::default();
        let c = ctx(&stats, &options, true);

        let b = block("Introduction", "Helvetica", 24.0, 400.0);
        assert_eq!(
            OutlierPolicy.classify(&b, &c),
            Some(HeadingLevel::H1)
        );
    }

    #[test]
    fn test_outlier_policy_levels_by_rank() {
        let stats = SizeStatistics::from_sizes(&[24.0, 18.0, 14.0, 12.0, 10.0]);
        let options = ExtractOptions::default();
        let c = ctx(&stats, &options, true);

        let classify = |size: f32| {
            OutlierPolicy
                .classify(&block("Heading", "Helvetica-Bold", size, 400.0), &c)
                .unwrap()
        };
        assert_eq!(classify(24.0), HeadingLevel::H1);
        assert_eq!(classify(18.0), HeadingLevel::H2);
        assert_eq!(classify(14.0), HeadingLevel::H3);
        assert_eq!(classify(12.0), HeadingLevel::H4);
        // Below H4 rank and unranked sizes both cap at H4.
        assert_eq!(classify(10.0), HeadingLevel::H4);
        assert_eq!(classify(9.0), HeadingLevel::H4);
    }

    #[test]
    fn test_fixed_ratio_levels() {
        let stats = SizeStatistics::from_sizes(&[12.0]);
        let options = ExtractOptions::default();
        let c = ctx(&stats, &options, true);
        let policy = FixedRatioPolicy::default();

        let classify =
            |font: &str, size: f32| policy.classify(&block("Heading", font, size, 400.0), &c);

        // page_avg_size is 12: ratios 2.0, 1.6, 1.3
        assert_eq!(classify("F", 24.0), Some(HeadingLevel::H1));
        assert_eq!(classify("F", 19.2), Some(HeadingLevel::H2));
        assert_eq!(classify("F", 15.6), Some(HeadingLevel::H3));
        // Bold at body size qualifies but only at H4.
        assert_eq!(classify("F-Bold", 12.0), Some(HeadingLevel::H4));
        // Plain body size does not qualify.
        assert_eq!(classify("F", 12.0), None);
    }
}
