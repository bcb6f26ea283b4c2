use monty_engine::{Strategy, TrialBatch};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Bar, BarChart, BarGroup, Block as BlockWidget, Widget},
};

use crate::{text::Text, view::widgets::style};

/// Bar chart of the simulated win rate of each strategy, in percent.
#[derive(Debug)]
pub struct WinRateChart<'a> {
    batch: &'a TrialBatch,
    text: &'static Text,
    block: Option<BlockWidget<'a>>,
}

impl<'a> WinRateChart<'a> {
    pub fn new(batch: &'a TrialBatch, text: &'static Text) -> Self {
        Self {
            batch,
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

    fn bar(&self, strategy: Strategy) -> Bar<'static> {
        let (label, style) = match strategy {
            Strategy::Stay => (self.text.key_stay, style::STAY_BAR),
            Strategy::Switch => (self.text.key_switch, style::SWITCH_BAR),
        };
        let percent = self.batch.win_rate(strategy) * 100.0;
        Bar::with_label(label, tenths(percent))
            .text_value(format!("{percent:.1}%"))
            .style(style)
    }
}

/// Bar values are integers, so rates are charted in tenths of a percent.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn tenths(percent: f64) -> u64 {
    (percent * 10.0).round().clamp(0.0, 1000.0) as u64
}

impl Widget for WinRateChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bars = Strategy::ALL.map(|strategy| self.bar(strategy));
        let mut chart = BarChart::default()
            .data(BarGroup::default().bars(&bars))
            .max(1000)
            .bar_width(12)
            .bar_gap(4);
        if let Some(block) = self.block {
            chart = chart.block(block);
        }
        chart.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenths() {
        assert_eq!(tenths(33.34), 333);
        assert_eq!(tenths(66.66), 667);
        assert_eq!(tenths(100.0), 1000);
        assert_eq!(tenths(0.0), 0);
    }
}
