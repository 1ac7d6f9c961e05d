//! Document language detection and RTL handling.

use log::debug;
use whatlang::Lang;

use crate::extract::PageSource;

/// How many opening pages to sample for language detection.
const SAMPLE_PAGES: u32 = 3;

/// Detects the document language from the opening pages.
///
/// The first non-empty word decides when whatlang is confident in it
/// alone; short or ambiguous first words widen the sample to the whole
/// page's text. Pages that fail to extract or hold no text are skipped.
/// Falls back to `"en"`.
pub fn detect_document_language(source: &dyn PageSource) -> String {
    let last = source.page_count().min(SAMPLE_PAGES);
    for number in 1..=last {
        let content = match source.page(number) {
            Ok(content) => content,
            Err(err) => {
                debug!("language sample skipped page {}: {}", number, err);
                continue;
            }
        };
        let words: Vec<&str> = content
            .words
            .iter()
            .map(|w| w.text.trim())
            .filter(|t| !t.is_empty())
            .collect();
        let Some(first) = words.first() else {
            continue;
        };
        if let Some(info) = whatlang::detect(first) {
            if info.is_reliable() {
                return lang_code(info.lang()).to_string();
            }
        }
        let sample = words.join(" ");
        if let Some(info) = whatlang::detect(&sample) {
            return lang_code(info.lang()).to_string();
        }
    }
    "en".to_string()
}

fn lang_code(lang: Lang) -> &'static str {
    match lang {
        Lang::Eng => "en",
        Lang::Ara => "ar",
        Lang::Heb => "he",
        Lang::Pes => "fa",
        Lang::Urd => "ur",
        other => other.code(),
    }
}

/// Whether the language is written right to left.
pub fn is_rtl(lang: &str) -> bool {
    matches!(lang, "ar" | "he" | "fa" | "ur" | "ara" | "heb" | "pes" | "urd")
}

/// Whether the word-shape heading heuristics apply. They are tuned for
/// English text and mostly misfire elsewhere.
pub fn is_latin_script(lang: &str) -> bool {
    lang == "en"
}

/// Reverses the character order of RTL text. Extraction walks glyphs in
/// visual order, which reads backwards for RTL scripts.
pub fn reverse_if_rtl(text: &str, lang: &str) -> String {
    if is_rtl(lang) {
        text.chars().rev().collect()
    } else {
        text.to_string()
    }
}
