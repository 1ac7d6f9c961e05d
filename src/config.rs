//! Extraction options and heuristic tuning knobs.
//!
//! Every threshold the pipeline uses is a named field here rather than a
//! literal buried in a stage, so deployments can retune without code changes.

/// Which heading classification policy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifierKind {
    /// Statistical outlier against the document-wide size distribution;
    /// levels assigned by rank among distinct sizes.
    #[default]
    Outlier,
    /// Fixed multipliers of the page-local average size (1.2 / 1.5 / 1.8).
    FixedRatio,
}

/// What to do with a document whose outline comes out empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyOutlinePolicy {
    /// Write the JSON file anyway (title-only output).
    #[default]
    Write,
    /// Skip the document entirely; no output file is produced.
    Skip,
}

/// Options controlling outline extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Multiplier on the size standard deviation for the outlier test.
    pub threshold_factor: f32,

    /// Number of leading pages searched for the document title.
    pub title_pages: u32,

    /// Fraction of the page height excluded at the top (running headers).
    pub top_margin: f32,

    /// Fraction of the page height past which blocks are excluded
    /// (running footers); expressed as a position ratio, not a band width.
    pub bottom_margin: f32,

    /// Gap below `fragment_gap_ratio × previous size` joins glyph runs
    /// into one word with no separating space.
    pub fragment_gap_ratio: f32,

    /// Gap below `word_gap_ratio × page average size` joins same-style
    /// words into one token with a separating space.
    pub word_gap_ratio: f32,

    /// Two sizes are the same style if they differ by less than this.
    pub size_match_tolerance: f32,

    /// Lines merge into one block when their vertical gap is at most
    /// `line_merge_gap_ratio × page average size`.
    pub line_merge_gap_ratio: f32,

    /// Horizontal tolerance, in page units, when testing table overlap.
    pub table_overlap_margin: f32,

    /// Fraction of the page height, measured from the bottom, scanned for
    /// repeated footer text.
    pub footer_band_ratio: f32,

    /// A bottom-band string is a footer when it recurs on at least this
    /// fraction of the document's pages.
    pub footer_page_ratio: f32,

    /// Heading classification policy.
    pub classifier: ClassifierKind,

    /// Behavior for documents that yield no outline entries.
    pub empty_outline: EmptyOutlinePolicy,
}

impl ExtractOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the outlier threshold factor.
    pub fn with_threshold_factor(mut self, factor: f32) -> Self {
        self.threshold_factor = factor;
        self
    }

    /// Set how many leading pages are searched for the title.
    pub fn with_title_pages(mut self, pages: u32) -> Self {
        self.title_pages = pages;
        self
    }

    /// Set the top exclusion margin as a fraction of page height.
    pub fn with_top_margin(mut self, ratio: f32) -> Self {
        self.top_margin = ratio;
        self
    }

    /// Set the bottom exclusion boundary as a fraction of page height.
    pub fn with_bottom_margin(mut self, ratio: f32) -> Self {
        self.bottom_margin = ratio;
        self
    }

    /// Select the classification policy.
    pub fn with_classifier(mut self, kind: ClassifierKind) -> Self {
        self.classifier = kind;
        self
    }

    /// Use the fixed-ratio classification policy.
    pub fn fixed_ratio(mut self) -> Self {
        self.classifier = ClassifierKind::FixedRatio;
        self
    }

    /// Set the empty-outline policy.
    pub fn with_empty_outline(mut self, policy: EmptyOutlinePolicy) -> Self {
        self.empty_outline = policy;
        self
    }

    /// Skip documents with no outline entries instead of writing them.
    pub fn skip_empty(mut self) -> Self {
        self.empty_outline = EmptyOutlinePolicy::Skip;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            threshold_factor: 1.0,
            title_pages: 2,
            top_margin: 0.10,
            bottom_margin: 0.95,
            fragment_gap_ratio: 0.5,
            word_gap_ratio: 0.6,
            size_match_tolerance: 0.5,
            line_merge_gap_ratio: 4.0,
            table_overlap_margin: 3.0,
            footer_band_ratio: 0.10,
            footer_page_ratio: 0.7,
            classifier: ClassifierKind::Outlier,
            empty_outline: EmptyOutlinePolicy::Write,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = ExtractOptions::new()
            .with_threshold_factor(1.5)
            .with_title_pages(3)
            .fixed_ratio()
            .skip_empty();

        assert_eq!(options.threshold_factor, 1.5);
        assert_eq!(options.title_pages, 3);
        assert_eq!(options.classifier, ClassifierKind::FixedRatio);
        assert_eq!(options.empty_outline, EmptyOutlinePolicy::Skip);
    }

    #[test]
    fn test_default_options() {
        let options = ExtractOptions::default();
        assert_eq!(options.threshold_factor, 1.0);
        assert_eq!(options.title_pages, 2);
        assert_eq!(options.top_margin, 0.10);
        assert_eq!(options.bottom_margin, 0.95);
        assert_eq!(options.classifier, ClassifierKind::Outlier);
        assert_eq!(options.empty_outline, EmptyOutlinePolicy::Write);
    }
}
