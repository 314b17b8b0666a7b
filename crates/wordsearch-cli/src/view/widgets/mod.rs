use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{grid_display::*, key_binding_display::*, word_list_display::*};

mod grid_display;
mod key_binding_display;
mod word_list_display;

mod color {
    use ratatui::style::Color;

    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const GREEN: Color = Color::Rgb(0, 200, 0);
    pub const YELLOW: Color = Color::Rgb(255, 220, 0);
    pub const CYAN: Color = Color::Rgb(0, 200, 255);
}

pub mod style {
    use ratatui::style::{Color, Modifier, Style};

    use crate::view::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const DIM: Style = fg_bg(color::GRAY, color::BLACK);
    pub const FOUND: Style = fg_bg(color::BLACK, color::GREEN);
    pub const ANCHOR: Style = fg_bg(color::BLACK, color::YELLOW);
    pub const CURSOR: Style = fg_bg(color::BLACK, color::CYAN);
    pub const FOUND_WORD: Style = fg_bg(color::GREEN, color::BLACK).add_modifier(Modifier::CROSSED_OUT);
    pub const KEY: Style = fg_bg(color::CYAN, color::BLACK);
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
