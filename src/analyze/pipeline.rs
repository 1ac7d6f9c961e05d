//! Two-pass outline extraction pipeline.
//!
//! Pass one walks every page: words are bucketed into lines, grouped into
//! styled tokens, and merged into candidate blocks, while footer
//! repetition counts and document-wide size samples accumulate. Pass two
//! classifies each block against the finished statistics and filters.

use log::{debug, warn};

use crate::config::{ClassifierKind, ExtractOptions};
use crate::error::Result;
use crate::extract::PageSource;
use crate::model::{DocumentOutline, HeadingBlock, Line, TableRegion};

use super::classify::{
    passes_prefilters, ClassifyContext, ClassifyPolicy, FixedRatioPolicy, OutlierPolicy,
};
use super::filter::{is_inside_table, FooterFilter};
use super::group::{assemble_lines, group_words};
use super::language::{detect_document_language, is_latin_script, reverse_if_rtl};
use super::merge::merge_lines;
use super::stats::SizeStatistics;
use super::title::TitleSelector;

/// Per-page results of the first pass.
struct PagePass {
    number: u32,
    width: f32,
    height: f32,
    avg_size: f32,
    blocks: Vec<HeadingBlock>,
    tables: Vec<TableRegion>,
}

/// Drives outline extraction over a [`PageSource`].
pub struct OutlinePipeline<'a> {
    source: &'a dyn PageSource,
    options: &'a ExtractOptions,
}

impl<'a> OutlinePipeline<'a> {
    pub fn new(source: &'a dyn PageSource, options: &'a ExtractOptions) -> Self {
        Self { source, options }
    }

    pub fn run(&self) -> Result<DocumentOutline> {
        let (pages, footer, stats) = self.collect_pages();

        let lang = detect_document_language(self.source);
        let latin = is_latin_script(&lang);
        debug!("document language {} (latin heuristics: {})", lang, latin);

        let policy: Box<dyn ClassifyPolicy> = match self.options.classifier {
            ClassifierKind::Outlier => Box::new(OutlierPolicy),
            ClassifierKind::FixedRatio => Box::new(FixedRatioPolicy::default()),
        };

        let mut outline = DocumentOutline::default();
        let mut title = TitleSelector::new();

        for page in &pages {
            let ctx = ClassifyContext {
                stats: &stats,
                page_height: page.height,
                page_avg_size: page.avg_size,
                latin_script: latin,
                options: self.options,
            };

            for block in &page.blocks {
                if is_inside_table(
                    block.y,
                    block.x0,
                    block.x1,
                    &page.tables,
                    self.options.table_overlap_margin,
                ) {
                    continue;
                }

                // Table interiors are excluded before title tracking so a
                // large cell value can never become the document title.
                if page.number <= self.options.title_pages {
                    title.observe(block, page.width);
                }
                if footer.is_footer(&block.text, self.options.footer_page_ratio) {
                    continue;
                }
                if !passes_prefilters(block, &ctx) {
                    continue;
                }

                if let Some(level) = policy.classify(block, &ctx) {
                    outline.push(level, reverse_if_rtl(&block.text, &lang), block.page);
                }
            }
        }

        outline.title = reverse_if_rtl(&title.finish(), &lang);
        Ok(outline)
    }

    /// First pass: lines, blocks, footer counts, and size samples.
    fn collect_pages(&self) -> (Vec<PagePass>, FooterFilter, SizeStatistics) {
        let mut pages = Vec::new();
        let mut footer = FooterFilter::new();
        let mut all_sizes = Vec::new();

        for number in 1..=self.source.page_count() {
            let content = match self.source.page(number) {
                Ok(content) => content,
                Err(err) => {
                    warn!("page {} failed to extract, skipping: {}", number, err);
                    continue;
                }
            };

            all_sizes.extend(content.words.iter().map(|w| w.size));
            let avg_size = if content.words.is_empty() {
                0.0
            } else {
                content.words.iter().map(|w| w.size).sum::<f32>() / content.words.len() as f32
            };

            let max_gap = self.options.word_gap_ratio * avg_size;
            let lines: Vec<Line> = assemble_lines(&content.words)
                .into_iter()
                .map(|(top, words)| Line {
                    top,
                    tokens: group_words(&words, max_gap, self.options),
                })
                .filter(|line| !line.tokens.is_empty())
                .collect();

            footer.observe_page(&lines, content.height, self.options.footer_band_ratio);
            let blocks = merge_lines(&lines, avg_size, number, self.options);

            pages.push(PagePass {
                number,
                width: content.width,
                height: content.height,
                avg_size,
                blocks,
                tables: content.tables,
            });
        }

        (pages, footer, SizeStatistics::from_sizes(&all_sizes))
    }
}
