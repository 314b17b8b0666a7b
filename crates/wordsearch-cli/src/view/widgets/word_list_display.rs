use std::collections::BTreeSet;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Text},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::style;

/// Words in play, with the found ones struck through.
#[derive(Debug)]
pub struct WordListDisplay<'a> {
    words: &'a BTreeSet<String>,
    found: &'a BTreeSet<String>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> WordListDisplay<'a> {
    pub fn new(words: &'a BTreeSet<String>, found: &'a BTreeSet<String>) -> Self {
        Self {
            words,
            found,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        let longest = self
            .words
            .iter()
            .map(|word| word.chars().count())
            .max()
            .unwrap_or(0)
            .max("FOUND 00/00".len());
        u16::try_from(longest).unwrap_or(u16::MAX)
            + super::block_horizontal_margin(self.block.as_ref())
    }

    fn lines(&self) -> impl Iterator<Item = Line<'a>> + use<'a> {
        let header = Line::styled(
            format!("FOUND {}/{}", self.found.len(), self.words.len()),
            style::DIM,
        );
        let found = self.found;
        let words = self.words.iter().map(move |word| {
            let style = if found.contains(word) {
                style::FOUND_WORD
            } else {
                style::DEFAULT
            };
            Line::styled(word.as_str(), style)
        });
        [header, Line::default()].into_iter().chain(words)
    }
}

impl Widget for WordListDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let inner = self.block.inner_if_some(area);
        Text::from_iter(self.lines()).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| (*w).to_owned()).collect()
    }

    #[test]
    fn test_lists_every_word() {
        let words = set(&["CAT", "DOG", "ELEPHANT"]);
        let found = set(&["DOG"]);
        let display = WordListDisplay::new(&words, &found);
        assert_eq!(display.width(), 11);

        let area = Rect::new(0, 0, 11, 5);
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);

        let row = |y: u16| (0..11).map(|x| buf[(x, y)].symbol()).collect::<String>();
        assert_eq!(row(0), "FOUND 1/3  ");
        assert_eq!(row(2), "CAT        ");
        assert_eq!(row(3), "DOG        ");
        assert_eq!(row(4), "ELEPHANT   ");
        assert_eq!(buf[(0, 3)].modifier, style::FOUND_WORD.add_modifier);
    }
}
