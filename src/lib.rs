//! # pdfoutline
//!
//! Heuristic title and heading-outline extraction from PDF documents.
//!
//! No PDF bookmark metadata is consulted. Instead the text layer is
//! reconstructed word by word and headings are inferred from typography:
//! font size statistics, boldness, position on the page, and repetition
//! across pages. The result is a document title plus a flat list of
//! `H1`..`H4` entries with page numbers, serializable to JSON.
//!
//! ## Example
//!
//! ```no_run
//! use pdfoutline::{extract_outline, ExtractOptions};
//!
//! let outline = extract_outline("report.pdf")?;
//! println!("{}", outline.to_json_pretty()?);
//! # Ok::<(), pdfoutline::Error>(())
//! ```
//!
//! Batch conversion of a whole directory runs in parallel via
//! [`batch::process_directory`].

pub mod analyze;
pub mod batch;
pub mod config;
pub mod error;
pub mod extract;
pub mod model;

use std::path::Path;

pub use analyze::OutlinePipeline;
pub use config::{ClassifierKind, EmptyOutlinePolicy, ExtractOptions};
pub use error::{Error, Result};
pub use extract::{LopdfSource, PageContent, PageSource};
pub use model::{DocumentOutline, HeadingLevel, OutlineEntry};

/// Extract the outline of one PDF file with default options.
pub fn extract_outline(path: impl AsRef<Path>) -> Result<DocumentOutline> {
    extract_outline_with_options(path, &ExtractOptions::default())
}

/// Extract the outline of one PDF file.
pub fn extract_outline_with_options(
    path: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<DocumentOutline> {
    let source = LopdfSource::open(path.as_ref())?;
    extract_outline_from_source(&source, options)
}

/// Extract an outline from any [`PageSource`] implementation.
///
/// Useful for feeding the pipeline from something other than a file on
/// disk, or for testing with synthetic pages.
pub fn extract_outline_from_source(
    source: &dyn PageSource,
    options: &ExtractOptions,
) -> Result<DocumentOutline> {
    OutlinePipeline::new(source, options).run()
}
