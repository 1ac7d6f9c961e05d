//! Word-level records produced by the extraction source.

/// A single extracted word with position and font information.
///
/// Coordinates are top-down page units: `top` is the distance from the top
/// edge of the page, `x0`/`x1` the left and right edges of the word.
#[derive(Debug, Clone)]
pub struct Word {
    /// The text content
    pub text: String,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Font size in points
    pub size: f32,
    /// Distance from the top of the page to the top of the word
    pub top: f32,
    /// Distance from the top of the page to the bottom of the word
    pub bottom: f32,
    /// Left edge
    pub x0: f32,
    /// Right edge
    pub x1: f32,
}

impl Word {
    pub fn new(
        text: impl Into<String>,
        font_name: impl Into<String>,
        size: f32,
        top: f32,
        x0: f32,
        x1: f32,
    ) -> Self {
        Self {
            text: text.into(),
            font_name: font_name.into(),
            size,
            top,
            bottom: top + size,
            x0,
            x1,
        }
    }
}

/// One or more raw word fragments merged into a single visual word or phrase.
///
/// Carries the first fragment's font and size as representative style, and
/// the union of the fragments' horizontal extent.
#[derive(Debug, Clone)]
pub struct GroupedToken {
    pub text: String,
    pub font_name: String,
    pub size: f32,
    pub x0: f32,
    pub x1: f32,
}

impl GroupedToken {
    /// Whether the token's font looks bold or black-weight.
    pub fn is_bold(&self) -> bool {
        is_bold_font(&self.font_name)
    }
}

/// Font-name weight sniffing: PDF fonts encode weight in the base font name.
pub fn is_bold_font(font_name: &str) -> bool {
    let lower = font_name.to_lowercase();
    lower.contains("bold") || lower.contains("black")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_bottom() {
        let w = Word::new("Hi", "Helvetica", 12.0, 100.0, 10.0, 24.0);
        assert_eq!(w.bottom, 112.0);
    }

    #[test]
    fn test_bold_font_detection() {
        assert!(is_bold_font("Helvetica-Bold"));
        assert!(is_bold_font("Arial-Black"));
        assert!(is_bold_font("NotoSans-BoldItalic"));
        assert!(!is_bold_font("Helvetica"));
        assert!(!is_bold_font("Times-Italic"));
    }
}
