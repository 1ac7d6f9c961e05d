//! Merging vertically adjacent, style-consistent lines into heading blocks.
//!
//! Multi-line titles and headings keep one font and size across their
//! lines; a style shift or a large vertical jump is a block boundary.

use crate::config::ExtractOptions;
use crate::model::{HeadingBlock, Line};

use super::normalize::{clean_text, is_dot_fill};

/// Merge a page's assembled lines into heading-candidate blocks.
///
/// The vertical merge threshold is `line_merge_gap_ratio ×` the page's
/// average font size (gap exactly at the threshold still merges). Lines
/// that normalize to nothing, or to a dot-fill leader, are dropped before
/// merging and do not break an ongoing run. Each block carries the first
/// merged line's font, size, and vertical position.
pub fn merge_lines(
    lines: &[Line],
    avg_size: f32,
    page: u32,
    options: &ExtractOptions,
) -> Vec<HeadingBlock> {
    let y_threshold = options.line_merge_gap_ratio * avg_size;

    let mut merged = Vec::new();
    let mut buffer: Option<BlockBuffer> = None;

    for line in lines {
        let Some(style) = line.tokens.first() else {
            continue;
        };
        let text = clean_text(&line.text());
        if text.is_empty() || is_dot_fill(&text) {
            continue;
        }

        let joins = buffer.as_ref().is_some_and(|b| {
            (line.top - b.last_top).abs() <= y_threshold
                && style.font_name == b.last_font
                && (style.size - b.last_size).abs() < options.size_match_tolerance
        });

        if joins {
            let b = buffer.as_mut().unwrap();
            b.text.push(' ');
            b.text.push_str(&text);
            b.x0 = b.x0.min(line.x0());
            b.x1 = b.x1.max(line.x1());
            b.last_top = line.top;
            b.last_font = style.font_name.clone();
            b.last_size = style.size;
        } else {
            if let Some(b) = buffer.take() {
                merged.push(b.finish(page));
            }
            buffer = Some(BlockBuffer {
                text,
                font_name: style.font_name.clone(),
                size: style.size,
                y: line.top,
                x0: line.x0(),
                x1: line.x1(),
                last_top: line.top,
                last_font: style.font_name.clone(),
                last_size: style.size,
            });
        }
    }

    if let Some(b) = buffer.take() {
        merged.push(b.finish(page));
    }

    merged
}

/// In-progress block: first line's style plus the running extent and the
/// last merged line's style for continuity tests.
struct BlockBuffer {
    text: String,
    font_name: String,
    size: f32,
    y: f32,
    x0: f32,
    x1: f32,
    last_top: f32,
    last_font: String,
    last_size: f32,
}

impl BlockBuffer {
    fn finish(self, page: u32) -> HeadingBlock {
        HeadingBlock {
            text: self.text,
            font_name: self.font_name,
            size: self.size,
            y: self.y,
            page,
            x0: self.x0,
            x1: self.x1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GroupedToken;

    fn line(text: &str, top: f32, font: &str, size: f32) -> Line {
        Line {
            top,
            tokens: vec![GroupedToken {
                text: text.to_string(),
                font_name: font.to_string(),
                size,
                x0: 50.0,
                x1: 50.0 + text.len() as f32 * size * 0.5,
            }],
        }
    }

    #[test]
    fn test_two_line_heading_merges() {
        let lines = vec![
            line("A Very Long", 100.0, "Helvetica-Bold", 18.0),
            line("Heading Text", 120.0, "Helvetica-Bold", 18.0),
        ];
        let blocks = merge_lines(&lines, 12.0, 1, &ExtractOptions::default());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "A Very Long Heading Text");
        assert_eq!(blocks[0].y, 100.0);
        assert_eq!(blocks[0].size, 18.0);
        assert_eq!(blocks[0].page, 1);
    }

    #[test]
    fn test_gap_exactly_at_threshold_merges() {
        // 4 × avg 12 = 48; a 48pt gap is still one block.
        let lines = vec![
            line("First", 100.0, "Helvetica", 12.0),
            line("Second", 148.0, "Helvetica", 12.0),
        ];
        let blocks = merge_lines(&lines, 12.0, 1, &ExtractOptions::default());
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn test_gap_past_threshold_breaks() {
        let lines = vec![
            line("First", 100.0, "Helvetica", 12.0),
            line("Second", 148.1, "Helvetica", 12.0),
        ];
        let blocks = merge_lines(&lines, 12.0, 1, &ExtractOptions::default());
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_size_difference_boundary() {
        // 0.49 below the tolerance merges; 0.5 does not.
        let close = vec![
            line("First", 100.0, "Helvetica", 12.0),
            line("Second", 115.0, "Helvetica", 12.49),
        ];
        assert_eq!(merge_lines(&close, 12.0, 1, &Default::default()).len(), 1);

        let apart = vec![
            line("First", 100.0, "Helvetica", 12.0),
            line("Second", 115.0, "Helvetica", 12.5),
        ];
        assert_eq!(merge_lines(&apart, 12.0, 1, &Default::default()).len(), 2);
    }

    #[test]
    fn test_font_change_breaks() {
        let lines = vec![
            line("Title", 100.0, "Helvetica-Bold", 12.0),
            line("Body", 115.0, "Helvetica", 12.0),
        ];
        let blocks = merge_lines(&lines, 12.0, 1, &ExtractOptions::default());
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_dot_fill_lines_dropped() {
        let lines = vec![
            line("Contents", 100.0, "Helvetica", 12.0),
            line("........", 115.0, "Helvetica", 12.0),
            line("...... 12", 130.0, "Helvetica", 12.0),
        ];
        let blocks = merge_lines(&lines, 12.0, 1, &ExtractOptions::default());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "Contents");
    }

    #[test]
    fn test_block_extent_accumulates() {
        let mut l1 = line("Short", 100.0, "Helvetica", 12.0);
        l1.tokens[0].x0 = 60.0;
        l1.tokens[0].x1 = 90.0;
        let mut l2 = line("Much longer line", 115.0, "Helvetica", 12.0);
        l2.tokens[0].x0 = 40.0;
        l2.tokens[0].x1 = 200.0;

        let blocks = merge_lines(&[l1, l2], 12.0, 1, &ExtractOptions::default());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].x0, 40.0);
        assert_eq!(blocks[0].x1, 200.0);
    }
}
