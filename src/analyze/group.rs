//! Word grouping and line assembly.
//!
//! PDF extraction frequently fragments one visual word into several glyph
//! runs with tiny or zero gaps. Grouping distinguishes "fragment of the
//! same word" (near-zero gap, concatenated directly) from "separate word
//! in the same run" (moderate gap, same style, joined with a space), and
//! flushes a token on anything else.

use std::collections::BTreeMap;

use crate::config::ExtractOptions;
use crate::model::{GroupedToken, Word};

/// Merge one line's words into grouped tokens.
///
/// `max_gap` is the loose joining threshold for same-style words,
/// `0.6 ×` the page's average font size. Input order does not matter;
/// words are sorted left to right first. Non-empty input always yields
/// at least one token.
pub fn group_words(words: &[Word], max_gap: f32, options: &ExtractOptions) -> Vec<GroupedToken> {
    if words.is_empty() {
        return vec![];
    }

    let mut sorted: Vec<&Word> = words.iter().collect();
    sorted.sort_by(|a, b| a.x0.partial_cmp(&b.x0).unwrap_or(std::cmp::Ordering::Equal));

    let mut grouped = Vec::new();
    let first = sorted[0];
    let mut buffer = TokenBuffer::start(first);
    let mut prev = first;

    for word in sorted.into_iter().skip(1) {
        let gap = word.x0 - prev.x1;

        if gap < options.fragment_gap_ratio * prev.size {
            // Glyph runs of the same visual word: no separating space.
            buffer.push(word, false);
        } else if gap < max_gap
            && word.font_name == prev.font_name
            && (word.size - prev.size).abs() < options.size_match_tolerance
        {
            // Separate word, same style run.
            buffer.push(word, true);
        } else {
            grouped.push(buffer.finish());
            buffer = TokenBuffer::start(word);
        }
        prev = word;
    }

    grouped.push(buffer.finish());
    grouped
}

/// Bucket a page's words into lines by vertical position quantized to one
/// decimal place (tolerance for sub-pixel extraction jitter). Lines come
/// back sorted top of page to bottom.
pub fn assemble_lines(words: &[Word]) -> Vec<(f32, Vec<Word>)> {
    let mut buckets: BTreeMap<i64, Vec<Word>> = BTreeMap::new();
    for word in words {
        let key = (word.top * 10.0).round() as i64;
        buckets.entry(key).or_default().push(word.clone());
    }

    buckets
        .into_iter()
        .map(|(key, words)| (key as f32 / 10.0, words))
        .collect()
}

/// Accumulates fragments into one token, keeping the first fragment's
/// style as representative.
struct TokenBuffer {
    text: String,
    font_name: String,
    size: f32,
    x0: f32,
    x1: f32,
}

impl TokenBuffer {
    fn start(word: &Word) -> Self {
        Self {
            text: word.text.clone(),
            font_name: word.font_name.clone(),
            size: word.size,
            x0: word.x0,
            x1: word.x1,
        }
    }

    fn push(&mut self, word: &Word, separate: bool) {
        if separate {
            self.text.push(' ');
        }
        self.text.push_str(&word.text);
        self.x1 = self.x1.max(word.x1);
    }

    fn finish(self) -> GroupedToken {
        GroupedToken {
            text: self.text,
            font_name: self.font_name,
            size: self.size,
            x0: self.x0,
            x1: self.x1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, x0: f32, x1: f32) -> Word {
        Word::new(text, "Helvetica", 10.0, 100.0, x0, x1)
    }

    fn word_styled(text: &str, x0: f32, x1: f32, font: &str, size: f32) -> Word {
        Word::new(text, font, size, 100.0, x0, x1)
    }

    #[test]
    fn test_fragments_concatenate_without_space() {
        // Gap of 1pt at size 10 is below the 0.5 × size fragment threshold.
        let words = vec![word("Intro", 10.0, 40.0), word("duction", 41.0, 80.0)];
        let tokens = group_words(&words, 6.0, &ExtractOptions::default());
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "Introduction");
        assert_eq!(tokens[0].x0, 10.0);
        assert_eq!(tokens[0].x1, 80.0);
    }

    #[test]
    fn test_same_style_words_join_with_space() {
        // Gap of 5.5pt: past the fragment threshold (5.0), under max_gap.
        let words = vec![word("Hello", 10.0, 40.0), word("World", 45.5, 80.0)];
        let tokens = group_words(&words, 6.0, &ExtractOptions::default());
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "Hello World");
    }

    #[test]
    fn test_wide_gap_flushes() {
        let words = vec![word("Left", 10.0, 40.0), word("Right", 200.0, 240.0)];
        let tokens = group_words(&words, 6.0, &ExtractOptions::default());
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "Left");
        assert_eq!(tokens[1].text, "Right");
    }

    #[test]
    fn test_font_change_flushes() {
        let words = vec![
            word("Plain", 10.0, 40.0),
            word_styled("Bold", 45.5, 80.0, "Helvetica-Bold", 10.0),
        ];
        let tokens = group_words(&words, 6.0, &ExtractOptions::default());
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_size_change_flushes() {
        let words = vec![
            word("Small", 10.0, 40.0),
            word_styled("Big", 45.5, 80.0, "Helvetica", 10.5),
        ];
        let tokens = group_words(&words, 6.0, &ExtractOptions::default());
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_permutation_invariant() {
        let a = word("One", 10.0, 30.0);
        let b = word("Two", 100.0, 130.0);
        let c = word("Three", 200.0, 240.0);

        let forward = group_words(&[a.clone(), b.clone(), c.clone()], 6.0, &Default::default());
        let backward = group_words(&[c, b, a], 6.0, &Default::default());

        let texts = |tokens: &[GroupedToken]| {
            tokens.iter().map(|t| t.text.clone()).collect::<Vec<_>>()
        };
        assert_eq!(texts(&forward), texts(&backward));
    }

    #[test]
    fn test_non_empty_input_never_empty_output() {
        let tokens = group_words(&[word("x", 0.0, 5.0)], 6.0, &Default::default());
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn test_assemble_lines_quantizes_and_sorts() {
        let words = vec![
            Word::new("low", "F", 10.0, 300.0, 0.0, 20.0),
            Word::new("high", "F", 10.0, 100.02, 0.0, 20.0),
            Word::new("also-high", "F", 10.0, 100.04, 30.0, 60.0),
        ];
        let lines = assemble_lines(&words);
        assert_eq!(lines.len(), 2);
        // 100.02 and 100.04 both quantize to 100.0 and come first.
        assert_eq!(lines[0].0, 100.0);
        assert_eq!(lines[0].1.len(), 2);
        assert_eq!(lines[1].0, 300.0);
    }
}
