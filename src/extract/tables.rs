//! Table-region detection from word alignment (Stream-mode style).
//!
//! Detects runs of consecutive rows whose words line up in three or more
//! columns and returns their bounding boxes. Only the boxes are needed:
//! downstream, blocks falling inside one are excluded from the outline.

use crate::model::{TableRegion, Word};

/// Configuration for table-region detection.
#[derive(Debug, Clone)]
pub struct TableDetectConfig {
    /// Minimum consecutive aligned rows to count as a table.
    pub min_rows: usize,
    /// Minimum columns per row.
    pub min_columns: usize,
    /// Horizontal tolerance when matching column starts between rows.
    pub column_tolerance: f32,
    /// Vertical tolerance when bucketing words into rows.
    pub row_tolerance: f32,
}

impl Default for TableDetectConfig {
    fn default() -> Self {
        Self {
            min_rows: 2,
            min_columns: 3,
            column_tolerance: 5.0,
            row_tolerance: 2.0,
        }
    }
}

/// Detect table bounding boxes in a page's words.
pub fn detect_table_regions(words: &[Word], config: &TableDetectConfig) -> Vec<TableRegion> {
    if words.is_empty() {
        return vec![];
    }

    let rows = group_into_rows(words, config.row_tolerance);

    let mut regions = Vec::new();
    let mut run_start: Option<usize> = None;

    // The last index never aligns with a successor, so every run is
    // flushed inside the loop.
    for i in 0..rows.len() {
        let aligned = i + 1 < rows.len() && rows_align(&rows[i], &rows[i + 1], config);

        if aligned {
            run_start.get_or_insert(i);
        } else if let Some(start) = run_start.take() {
            // Run covers rows start..=i; the last row aligned with its
            // predecessor even though it has no aligned successor.
            let len = i - start + 1;
            if len >= config.min_rows {
                regions.push(bounding_box(&rows[start..=i]));
            }
        }
    }

    regions
}

/// Bucket words into rows by vertical position, sorted top to bottom,
/// words within a row sorted left to right.
fn group_into_rows(words: &[Word], tolerance: f32) -> Vec<Vec<Word>> {
    let mut sorted: Vec<Word> = words.to_vec();
    sorted.sort_by(|a, b| {
        a.top
            .partial_cmp(&b.top)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut rows: Vec<Vec<Word>> = Vec::new();
    for word in sorted {
        match rows.last_mut() {
            Some(row) if (word.top - row[0].top).abs() <= tolerance => row.push(word),
            _ => rows.push(vec![word]),
        }
    }

    for row in &mut rows {
        row.sort_by(|a, b| a.x0.partial_cmp(&b.x0).unwrap_or(std::cmp::Ordering::Equal));
    }

    rows
}

/// Two rows align when both have at least `min_columns` words and each
/// column start in one row has a matching start in the other.
fn rows_align(a: &[Word], b: &[Word], config: &TableDetectConfig) -> bool {
    if a.len() < config.min_columns || b.len() < config.min_columns || a.len() != b.len() {
        return false;
    }

    a.iter()
        .zip(b.iter())
        .all(|(wa, wb)| (wa.x0 - wb.x0).abs() <= config.column_tolerance)
}

fn bounding_box(rows: &[Vec<Word>]) -> TableRegion {
    let mut region = TableRegion {
        x0: f32::INFINITY,
        top: f32::INFINITY,
        x1: f32::NEG_INFINITY,
        bottom: f32::NEG_INFINITY,
    };
    for word in rows.iter().flatten() {
        region.x0 = region.x0.min(word.x0);
        region.top = region.top.min(word.top);
        region.x1 = region.x1.max(word.x1);
        region.bottom = region.bottom.max(word.bottom);
    }
    region
}
