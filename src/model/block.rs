//! Line, heading-block, and table-region records.

use super::word::{is_bold_font, GroupedToken};

/// An assembled text line: the grouped tokens sharing one quantized
/// vertical position on a page. Transient, rebuilt per page.
#[derive(Debug, Clone)]
pub struct Line {
    /// Quantized vertical position (distance from page top, one decimal).
    pub top: f32,
    /// Tokens on the line, left to right.
    pub tokens: Vec<GroupedToken>,
}

impl Line {
    /// Space-joined raw text of the line.
    pub fn text(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Leftmost extent of the line's tokens.
    pub fn x0(&self) -> f32 {
        self.tokens
            .iter()
            .map(|t| t.x0)
            .fold(f32::INFINITY, f32::min)
    }

    /// Rightmost extent of the line's tokens.
    pub fn x1(&self) -> f32 {
        self.tokens
            .iter()
            .map(|t| t.x1)
            .fold(f32::NEG_INFINITY, f32::max)
    }
}

/// A merged run of style-consistent lines, the unit the classifier sees.
///
/// Carries the first merged line's font, size, and vertical position, and
/// the horizontal extent of everything merged into it.
#[derive(Debug, Clone)]
pub struct HeadingBlock {
    pub text: String,
    pub font_name: String,
    pub size: f32,
    /// Vertical position of the block's first line (distance from page top).
    pub y: f32,
    /// 1-based page number of the page the first line appeared on.
    pub page: u32,
    pub x0: f32,
    pub x1: f32,
}

impl HeadingBlock {
    /// Whether the block's font looks bold or black-weight.
    pub fn is_bold(&self) -> bool {
        is_bold_font(&self.font_name)
    }

    /// Whether the text contains any digit character.
    pub fn contains_digit(&self) -> bool {
        self.text.chars().any(|c| c.is_ascii_digit())
    }
}

/// Bounding box of a detected table, in top-down page coordinates.
/// Used only to exclude blocks that fall inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableRegion {
    pub x0: f32,
    pub top: f32,
    pub x1: f32,
    pub bottom: f32,
}
