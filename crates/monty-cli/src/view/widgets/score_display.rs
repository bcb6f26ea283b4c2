use monty_engine::Score;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::{text::Text, view::widgets::style};

/// Scoreboard: wins, losses, rounds played and win rate.
#[derive(Debug)]
pub struct ScoreDisplay<'a> {
    score: Score,
    text: &'static Text,
    block: Option<BlockWidget<'a>>,
}

impl<'a> ScoreDisplay<'a> {
    pub fn new(score: Score, text: &'static Text) -> Self {
        Self {
            score,
            text,
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
        22 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        4 + super::block_vertical_margin(self.block.as_ref())
    }

    fn rows(&self) -> [(&'static str, String); 4] {
        let win_rate = self
            .score
            .win_rate()
            .map_or_else(|| "-".to_owned(), |rate| format!("{:.1}%", rate * 100.0));
        [
            (self.text.wins, self.score.wins().to_string()),
            (self.text.losses, self.score.losses().to_string()),
            (self.text.played, self.score.played().to_string()),
            (self.text.win_rate, win_rate),
        ]
    }
}

impl Widget for ScoreDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let rows = self.rows();
        let row_areas = Layout::vertical(rows.iter().map(|_| Constraint::Length(1))).split(area);
        for ((label, value), row_area) in rows.into_iter().zip(row_areas.iter().copied()) {
            let [label_area, value_area] =
                row_area.layout(&Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]));
            Line::styled(label, style::DEFAULT)
                .left_aligned()
                .render(label_area, buf);
            Line::styled(value, style::DEFAULT)
                .right_aligned()
                .render(value_area, buf);
        }
    }
}
