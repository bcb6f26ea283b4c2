use monty_engine::RoundView;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::{text::Text, view::widgets::style};

const DOOR_WIDTH: u16 = 12;
const DOOR_HEIGHT: u16 = 5;

/// Door counts up to this are drawn in full; above it only the doors that
/// matter to the player are drawn.
pub const MAX_DRAWN_DOORS: usize = 7;

/// Row of doors for the current round.
///
/// Before the pick the row shows every door (or only the cursor door for large
/// door counts). After the pick it shows the picked door and the closed
/// alternative, plus every opened door when they fit.
#[derive(Debug)]
pub struct DoorRow<'a> {
    view: &'a RoundView,
    text: &'static Text,
    cursor: usize,
    block: Option<BlockWidget<'a>>,
}

impl<'a> DoorRow<'a> {
    pub fn new(view: &'a RoundView, text: &'static Text, cursor: usize) -> Self {
        Self {
            view,
            text,
            cursor,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn height(&self) -> u16 {
        DOOR_HEIGHT + super::block_vertical_margin(self.block.as_ref())
    }

    /// Returns the doors to draw, in ascending order.
    pub fn visible_doors(&self) -> Vec<usize> {
        let count = self.view.door_count.get();
        if count <= MAX_DRAWN_DOORS {
            return (1..=count).collect();
        }
        match (self.view.user_pick, self.view.closed_alternative) {
            (Some(user_pick), Some(closed)) => {
                let mut doors = vec![user_pick, closed];
                doors.sort_unstable();
                doors
            }
            _ => vec![self.cursor],
        }
    }

    fn door_content(&self, door: usize) -> (&'static str, Style) {
        if let Some(prize_door) = self.view.prize_door {
            let content = if door == prize_door {
                self.text.car
            } else {
                self.text.goat
            };
            let style = match (self.view.final_pick == Some(door), self.view.win) {
                (true, Some(true)) => style::WIN,
                (true, _) => style::LOSE,
                (false, _) => style::OPEN_DOOR,
            };
            return (content, style);
        }
        if self.view.is_revealed(door) {
            (self.text.goat, style::OPEN_DOOR)
        } else {
            ("?", style::CLOSED_DOOR)
        }
    }

    fn border_style(&self, door: usize) -> Style {
        if door == self.cursor {
            style::CURSOR_DOOR
        } else if self.view.user_pick == Some(door) {
            style::PICKED_DOOR
        } else if self.view.is_revealed(door) {
            style::OPEN_DOOR
        } else {
            style::CLOSED_DOOR
        }
    }
}

impl Widget for DoorRow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let doors = self.visible_doors();
        let door_areas = Layout::horizontal(doors.iter().map(|_| Constraint::Length(DOOR_WIDTH)))
            .flex(Flex::Center)
            .spacing(1)
            .split(area);

        for (&door, &door_area) in doors.iter().zip(door_areas.iter()) {
            let mut title_style = self.border_style(door);
            if self.view.user_pick == Some(door) {
                title_style = title_style.add_modifier(Modifier::UNDERLINED);
            }
            let frame = BlockWidget::bordered()
                .border_style(self.border_style(door))
                .title(Line::styled(format!("{} {door}", self.text.door), title_style).centered());
            let inner = frame.inner(door_area);
            frame.render(door_area, buf);

            let (content, content_style) = self.door_content(door);
            let [_, content_area, _] = Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .areas(inner);
            Line::styled(content, content_style)
                .centered()
                .render(content_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use monty_engine::{DoorCount, GameSession, Seed, Strategy};

    use super::*;
    use crate::text::ENGLISH;

    fn session(door_count: usize) -> GameSession {
        GameSession::with_seed(DoorCount::new(door_count).unwrap(), Seed::ZERO)
    }

    #[test]
    fn test_small_round_shows_every_door() {
        let mut session = session(3);
        let view = session.view();
        assert_eq!(DoorRow::new(&view, &ENGLISH, 2).visible_doors(), [1, 2, 3]);

        let view = session.pick(1).unwrap();
        assert_eq!(DoorRow::new(&view, &ENGLISH, 1).visible_doors(), [1, 2, 3]);
    }

    #[test]
    fn test_large_round_shows_pick_and_alternative() {
        let mut session = session(1000);
        let view = session.view();
        assert_eq!(DoorRow::new(&view, &ENGLISH, 500).visible_doors(), [500]);

        let view = session.pick(500).unwrap();
        let closed = view.closed_alternative.unwrap();
        let mut expected = vec![500, closed];
        expected.sort_unstable();
        assert_eq!(DoorRow::new(&view, &ENGLISH, 500).visible_doors(), expected);
    }

    #[test]
    fn test_block_adds_border_to_height() {
        let session = session(3);
        let view = session.view();
        assert_eq!(DoorRow::new(&view, &ENGLISH, 1).height(), DOOR_HEIGHT);
        let framed = DoorRow::new(&view, &ENGLISH, 1).block(BlockWidget::bordered());
        assert_eq!(framed.height(), DOOR_HEIGHT + 2);
    }

    #[test]
    fn test_content_reveals_prize_after_decision() {
        let mut session = session(3);
        let view = session.pick(1).unwrap();
        let row = DoorRow::new(&view, &ENGLISH, 1);
        assert_eq!(row.door_content(1).0, "?");
        for door in view.revealed_doors.iter().copied() {
            assert_eq!(row.door_content(door).0, ENGLISH.goat);
        }

        let view = session.decide(Strategy::Stay).unwrap();
        let prize_door = view.prize_door.unwrap();
        let row = DoorRow::new(&view, &ENGLISH, 1);
        assert_eq!(row.door_content(prize_door).0, ENGLISH.car);
    }
}
