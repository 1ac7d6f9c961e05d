//! Data model for outline extraction.
//!
//! Word-level records come from the extraction source, get grouped into
//! lines and heading blocks by the analysis stages, and end up as the
//! serialized `DocumentOutline`.

mod block;
mod outline;
mod word;

pub use block::{HeadingBlock, Line, TableRegion};
pub use outline::{DocumentOutline, HeadingLevel, OutlineEntry};
pub use word::{GroupedToken, Word};
