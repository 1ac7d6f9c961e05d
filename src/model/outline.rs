//! The serialized output model: a document title plus a flat leveled
//! list of headings with page numbers.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Heading level, H1 (most prominent) through H4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    #[serde(rename = "H1")]
    H1,
    #[serde(rename = "H2")]
    H2,
    #[serde(rename = "H3")]
    H3,
    #[serde(rename = "H4")]
    H4,
}

impl HeadingLevel {
    /// Level for a 0-based rank among the document's distinct font sizes,
    /// largest first. Ranks past the third (and sizes with no rank at all)
    /// cap at H4.
    pub fn from_rank(rank: Option<usize>) -> Self {
        match rank {
            Some(0) => HeadingLevel::H1,
            Some(1) => HeadingLevel::H2,
            Some(2) => HeadingLevel::H3,
            _ => HeadingLevel::H4,
        }
    }

    /// Numeric suffix (1 for H1 .. 4 for H4).
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
        }
    }
}

/// One heading in the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    pub text: String,
    /// 1-based page number of the page the heading started on.
    pub page: u32,
}

/// The extracted structure of one document: a title and a flat, leveled
/// heading list in discovery order (page-major, top to bottom within a page).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutline {
    pub title: String,
    pub outline: Vec<OutlineEntry>,
}

impl DocumentOutline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a heading in discovery order.
    pub fn push(&mut self, level: HeadingLevel, text: impl Into<String>, page: u32) {
        self.outline.push(OutlineEntry {
            level,
            text: text.into(),
            page,
        });
    }

    /// Whether the outline has no headings (title may still be set).
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    /// Serialize to indented JSON. serde_json writes non-ASCII characters
    /// literally, which is what downstream indexers expect.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_rank() {
        assert_eq!(HeadingLevel::from_rank(Some(0)), HeadingLevel::H1);
        assert_eq!(HeadingLevel::from_rank(Some(1)), HeadingLevel::H2);
        assert_eq!(HeadingLevel::from_rank(Some(2)), HeadingLevel::H3);
        assert_eq!(HeadingLevel::from_rank(Some(3)), HeadingLevel::H4);
        assert_eq!(HeadingLevel::from_rank(Some(7)), HeadingLevel::H4);
        assert_eq!(HeadingLevel::from_rank(None), HeadingLevel::H4);
    }

    #[test]
    fn test_level_serializes_as_string() {
        let json = serde_json::to_string(&HeadingLevel::H2).unwrap();
        assert_eq!(json, "\"H2\"");
    }

    #[test]
    fn test_outline_json_shape() {
        let mut outline = DocumentOutline::new();
        outline.title = "Annual Report".to_string();
        outline.push(HeadingLevel::H1, "Introduction", 1);
        outline.push(HeadingLevel::H2, "Scope", 2);

        let json = outline.to_json_pretty().unwrap();
        assert!(json.contains("\"title\": \"Annual Report\""));
        assert!(json.contains("\"level\": \"H1\""));
        assert!(json.contains("\"page\": 2"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_non_ascii_preserved_literally() {
        let mut outline = DocumentOutline::new();
        outline.push(HeadingLevel::H1, "Überblick", 1);
        let json = outline.to_json_pretty().unwrap();
        assert!(json.contains("Überblick"));
        assert!(!json.contains("\\u"));
    }
}
