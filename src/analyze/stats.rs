//! Document-wide font-size statistics.
//!
//! Computed once per document over every extracted word and passed through
//! the pipeline as a value, so per-document processing stays free of shared
//! state under parallel batches.

use std::collections::BTreeSet;

/// Quantize a size to 0.1pt, the same precision the line assembler uses.
/// Distinct-size ranking on raw floats would be equality-fragile.
fn quantize(size: f32) -> i32 {
    (size * 10.0).round() as i32
}

/// Mean, spread, and the ranked set of distinct font sizes in a document.
#[derive(Debug, Clone, Default)]
pub struct SizeStatistics {
    /// Mean of all word sizes.
    pub mean: f32,
    /// Population standard deviation; 0 with fewer than two samples,
    /// which disables the outlier test.
    pub stdev: f32,
    /// Distinct sizes (0.1pt precision), largest first.
    sizes_desc: Vec<i32>,
}

impl SizeStatistics {
    /// Compute statistics over all word sizes in a document.
    pub fn from_sizes(sizes: &[f32]) -> Self {
        if sizes.is_empty() {
            return Self::default();
        }

        let n = sizes.len() as f32;
        let mean = sizes.iter().sum::<f32>() / n;

        let stdev = if sizes.len() < 2 {
            0.0
        } else {
            let variance = sizes.iter().map(|s| (s - mean).powi(2)).sum::<f32>() / n;
            variance.sqrt()
        };

        let unique: BTreeSet<i32> = sizes.iter().map(|s| quantize(*s)).collect();
        let sizes_desc: Vec<i32> = unique.into_iter().rev().collect();

        Self {
            mean,
            stdev,
            sizes_desc,
        }
    }

    /// 0-based rank of a size among the document's distinct sizes,
    /// largest first. `None` when the size was never observed.
    pub fn rank_of(&self, size: f32) -> Option<usize> {
        let key = quantize(size);
        self.sizes_desc.iter().position(|s| *s == key)
    }

    /// Whether a size is a statistical outlier above the mean. Always
    /// false when the spread is degenerate.
    pub fn is_outlier(&self, size: f32, threshold_factor: f32) -> bool {
        self.stdev > 0.0 && size > self.mean + threshold_factor * self.stdev
    }

    /// Number of distinct sizes observed.
    pub fn distinct_sizes(&self) -> usize {
        self.sizes_desc.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_population_stdev() {
        let stats = SizeStatistics::from_sizes(&[10.0, 10.0, 14.0, 14.0]);
        assert!((stats.mean - 12.0).abs() < 1e-5);
        // Population stdev of {10,10,14,14} is exactly 2.
        assert!((stats.stdev - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_single_sample_disables_outlier_test() {
        let stats = SizeStatistics::from_sizes(&[12.0]);
        assert_eq!(stats.stdev, 0.0);
        assert!(!stats.is_outlier(100.0, 1.0));
    }

    #[test]
    fn test_empty() {
        let stats = SizeStatistics::from_sizes(&[]);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.distinct_sizes(), 0);
        assert_eq!(stats.rank_of(12.0), None);
    }

    #[test]
    fn test_rank_largest_first() {
        let stats = SizeStatistics::from_sizes(&[12.0, 24.0, 12.0, 18.0]);
        assert_eq!(stats.rank_of(24.0), Some(0));
        assert_eq!(stats.rank_of(18.0), Some(1));
        assert_eq!(stats.rank_of(12.0), Some(2));
        assert_eq!(stats.rank_of(9.0), None);
    }

    #[test]
    fn test_rank_quantization() {
        // 12.04 and 12.0 collapse to the same 0.1pt bucket.
        let stats = SizeStatistics::from_sizes(&[12.0, 18.0]);
        assert_eq!(stats.rank_of(12.04), Some(1));
        assert_eq!(stats.rank_of(12.06), None);
    }

    #[test]
    fn test_outlier() {
        let mut sizes = vec![12.0; 50];
        sizes.push(24.0);
        let stats = SizeStatistics::from_sizes(&sizes);
        assert!(stats.is_outlier(24.0, 1.0));
        assert!(!stats.is_outlier(12.0, 1.0));
    }
}
