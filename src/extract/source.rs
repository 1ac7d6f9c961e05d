//! Abstract interface for per-page word extraction.

use crate::error::Result;
use crate::model::{TableRegion, Word};

/// Everything the pipeline needs from one page.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// 1-based page number.
    pub number: u32,
    /// Page width in PDF units.
    pub width: f32,
    /// Page height in PDF units.
    pub height: f32,
    /// Extracted words with position and font metadata. May be empty.
    pub words: Vec<Word>,
    /// Bounding boxes of detected tables on the page.
    pub tables: Vec<TableRegion>,
}

/// Abstract interface for page-level extraction.
///
/// Implementations provide page enumeration and per-page words, dimensions,
/// and table regions without exposing any concrete PDF library types.
/// A page that cannot be read should return an error; a page with no text
/// returns empty `words`, which is not an error.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Content of the given 1-based page.
    fn page(&self, number: u32) -> Result<PageContent>;
}
