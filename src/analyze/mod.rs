//! The heading-extraction pipeline stages.
//!
//! Raw words become grouped tokens and lines (`group`), lines become
//! heading-candidate blocks (`merge`), blocks are pruned (`filter`),
//! classified (`classify`), and assembled into the final outline
//! (`pipeline`), with document-wide typography in `stats` and text
//! hygiene in `normalize`.

mod classify;
mod filter;
mod group;
mod language;
mod merge;
mod normalize;
mod pipeline;
mod stats;
mod title;

pub use classify::{
    passes_prefilters, ClassifyContext, ClassifyPolicy, FixedRatioPolicy, OutlierPolicy,
};
pub use filter::{is_inside_table, FooterFilter};
pub use group::{assemble_lines, group_words};
pub use language::{detect_document_language, is_latin_script, is_rtl, reverse_if_rtl};
pub use merge::merge_lines;
pub use normalize::{clean_text, is_dot_fill};
pub use pipeline::OutlinePipeline;
pub use stats::SizeStatistics;
pub use title::TitleSelector;
