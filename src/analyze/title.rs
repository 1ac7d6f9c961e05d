//! Document title selection.

use crate::model::HeadingBlock;

/// Picks the document title from the blocks on the opening pages.
///
/// The title is the digit-free block with the largest visual footprint,
/// scored as font size times page width. Ties on footprint go to the
/// strictly larger font size.
#[derive(Debug, Default)]
pub struct TitleSelector {
    best: Option<Candidate>,
}

#[derive(Debug)]
struct Candidate {
    text: String,
    size: f32,
    area: f32,
}

impl TitleSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a block as a title candidate. Blocks containing digits are
    /// never titles.
    pub fn observe(&mut self, block: &HeadingBlock, page_width: f32) {
        if block.contains_digit() || block.text.trim().is_empty() {
            return;
        }
        let area = block.size * page_width;
        let better = match &self.best {
            None => true,
            Some(current) => {
                area > current.area || (area == current.area && block.size > current.size)
            }
        };
        if better {
            self.best = Some(Candidate {
                text: block.text.trim().to_string(),
                size: block.size,
                area,
            });
        }
    }

    /// The selected title, or an empty string when no candidate survived.
    pub fn finish(self) -> String {
        self.best.map(|c| c.text).unwrap_or_default()
    }
}
