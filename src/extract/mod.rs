//! PDF word extraction behind a trait seam.
//!
//! The analysis pipeline only sees [`PageSource`]; the concrete lopdf-backed
//! implementation (content-stream walking, font decoding, table-region
//! detection) lives here and can be swapped for a mock in tests.

mod lopdf_source;
mod source;
mod tables;

pub use lopdf_source::LopdfSource;
pub use source::{PageContent, PageSource};
pub use tables::{detect_table_regions, TableDetectConfig};
