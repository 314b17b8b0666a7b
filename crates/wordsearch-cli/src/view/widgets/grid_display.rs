use std::{collections::BTreeSet, iter};

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use wordsearch_engine::{Cell, Grid, Position};

use crate::view::widgets::style;

const CELL_WIDTH: u16 = 3;

/// The letter grid with the cursor, the pending anchor and found spans marked.
#[derive(Debug)]
pub struct GridDisplay<'a> {
    grid: &'a Grid,
    found: Option<&'a BTreeSet<Position>>,
    cursor: Option<Position>,
    anchor: Option<Position>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> GridDisplay<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            found: None,
            cursor: None,
            anchor: None,
            block: None,
        }
    }

    pub fn found(self, found: &'a BTreeSet<Position>) -> Self {
        Self {
            found: Some(found),
            ..self
        }
    }

    pub fn cursor(self, cursor: Position) -> Self {
        Self {
            cursor: Some(cursor),
            ..self
        }
    }

    pub fn anchor(self, anchor: Option<Position>) -> Self {
        Self { anchor, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        let cols = u16::try_from(self.grid.cols()).unwrap_or(u16::MAX);
        cols * CELL_WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        let lines = u16::try_from(self.grid.lines()).unwrap_or(u16::MAX);
        lines + super::block_vertical_margin(self.block.as_ref())
    }

    fn cell_style(&self, pos: Position) -> Style {
        if self.cursor == Some(pos) {
            style::CURSOR
        } else if self.anchor == Some(pos) {
            style::ANCHOR
        } else if self.found.is_some_and(|found| found.contains(&pos)) {
            style::FOUND
        } else {
            style::DEFAULT
        }
    }
}

impl Widget for GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..self.grid.cols()).map(|_| Constraint::Length(CELL_WIDTH));
        let row_constraints = (0..self.grid.lines()).map(|_| Constraint::Length(1));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let row_areas = vertical.split(area);
        for (line, (row_area, row)) in iter::zip(row_areas.iter(), self.grid.rows()).enumerate() {
            let cell_areas = horizontal.split(*row_area);
            for (col, (cell_area, cell)) in iter::zip(cell_areas.iter(), row).enumerate() {
                let pos = Position::new(line, col);
                let letter = cell.map_or('.', Cell::letter);
                Span::styled(format!(" {letter} "), self.cell_style(pos)).render(*cell_area, buf);
            }
        }
    }
}
