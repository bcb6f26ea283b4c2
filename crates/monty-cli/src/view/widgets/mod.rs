use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{door_row::*, key_binding_display::*, score_display::*, win_rate_chart::*};

mod door_row;
mod key_binding_display;
mod score_display;
mod win_rate_chart;

pub mod style {
    use ratatui::style::{Color, Modifier, Style};

    pub const DEFAULT: Style = Style::new().fg(Color::White);
    pub const TITLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    pub const HEADING: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    pub const HOST: Style = Style::new().fg(Color::Magenta);
    pub const HELP: Style = Style::new().fg(Color::DarkGray);
    pub const ERROR: Style = Style::new().fg(Color::Red);

    pub const CLOSED_DOOR: Style = Style::new().fg(Color::White);
    pub const PICKED_DOOR: Style = Style::new().fg(Color::Yellow);
    pub const CURSOR_DOOR: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    pub const OPEN_DOOR: Style = Style::new().fg(Color::DarkGray);

    pub const WIN: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
    pub const LOSE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
    pub const STAY_BAR: Style = Style::new().fg(Color::Red);
    pub const SWITCH_BAR: Style = Style::new().fg(Color::Green);
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
