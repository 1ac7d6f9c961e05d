//! Geometric and repetition filters for heading candidates.

use std::collections::{BTreeSet, HashMap};

use crate::model::{Line, TableRegion};

use super::normalize::clean_text;

/// Whether a block at vertical position `y` spanning `x0..x1` falls inside
/// any detected table region.
///
/// Inside means the region's vertical span contains `y` and the horizontal
/// spans overlap within the given tolerance margin: the block is neither
/// entirely left of the table minus the margin nor entirely right of it
/// plus the margin.
pub fn is_inside_table(y: f32, x0: f32, x1: f32, tables: &[TableRegion], margin: f32) -> bool {
    tables.iter().any(|t| {
        t.top <= y && y <= t.bottom && !(x1 < t.x0 - margin || x0 > t.x1 + margin)
    })
}

/// Detects running footers: text recurring near the page bottom across
/// most of a document's pages.
///
/// Fed one page at a time during the first pipeline pass; queried during
/// classification. A string counts once per page no matter how often it
/// appears there.
#[derive(Debug, Default)]
pub struct FooterFilter {
    counts: HashMap<String, u32>,
    pages_seen: u32,
}

impl FooterFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a page's lines. Lines whose vertical position is in the
    /// bottom `band_ratio` of the page become footer candidates.
    pub fn observe_page(&mut self, lines: &[Line], page_height: f32, band_ratio: f32) {
        self.pages_seen += 1;
        let band_start = page_height * (1.0 - band_ratio);

        let mut seen_on_page = BTreeSet::new();
        for line in lines {
            if line.top < band_start {
                continue;
            }
            let text = clean_text(&line.text());
            if text.is_empty() {
                continue;
            }
            if seen_on_page.insert(text.clone()) {
                *self.counts.entry(text).or_insert(0) += 1;
            }
        }
    }

    /// Whether a block's normalized text matches a footer candidate, i.e.
    /// recurred on at least `page_ratio` of the observed pages.
    pub fn is_footer(&self, text: &str, page_ratio: f32) -> bool {
        if self.pages_seen == 0 {
            return false;
        }
        let text = clean_text(text);
        match self.counts.get(&text) {
            Some(count) => *count as f32 >= page_ratio * self.pages_seen as f32,
            None => false,
        }
    }
}
