use crossterm::event::{KeyCode, KeyEvent};
use monty_engine::{DoorCount, GameSession, Seed};
use rand::Rng as _;
use rand_pcg::Pcg32;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    symbols::merge::MergeStrategy,
    text::{Line, Span, Text as RatatuiText},
    widgets::{Block, Paragraph, Row, Table, Wrap},
};

use crate::{
    text::{Language, Text},
    tui::{Screen, ScreenTransition},
    view::{
        screens::GameScreen,
        widgets::{KeyBinding, KeyBindingDisplay, style},
    },
};

/// Landing screen: explanation of the puzzle, the 3-door outcome table and
/// the door count to start with.
#[derive(Debug)]
pub struct HomeScreen {
    language: Language,
    door_count: DoorCount,
    seeds: Pcg32,
}

impl HomeScreen {
    /// Creates the home screen. Every game started from it gets its own seed
    /// drawn from `seed`, or from a random seed when `None`.
    pub fn new(language: Language, door_count: DoorCount, seed: Option<Seed>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        tracing::debug!(%seed, "home screen created");
        Self {
            language,
            door_count,
            seeds: seed.rng(),
        }
    }

    fn text(&self) -> &'static Text {
        self.language.text()
    }

    fn start_game(&mut self) -> ScreenTransition {
        let session = GameSession::with_seed(self.door_count, self.seeds.random());
        ScreenTransition::Push(Box::new(GameScreen::new(self.language, session)))
    }

    fn outcome_table(text: &'static Text) -> Table<'static> {
        let result = |win: bool| {
            if win {
                Span::styled(text.win, style::WIN)
            } else {
                Span::styled(text.lose, style::LOSE)
            }
        };
        // The player always picks door 1; each row puts the car behind another door.
        let rows = (1..=3).map(|prize_door| {
            let doors = (1..=3).map(|door| if door == prize_door { text.car } else { text.goat });
            let stay_wins = prize_door == 1;
            Row::new(
                doors
                    .map(Line::from)
                    .chain([result(stay_wins).into(), result(!stay_wins).into()]),
            )
        });
        Table::new(rows, [Constraint::Fill(1); 5])
            .header(Row::new(text.table_header).style(style::HEADING))
            .block(Block::bordered().merge_borders(MergeStrategy::Exact))
    }
}

impl Screen for HomeScreen {
    fn on_active(&mut self) {
        tracing::debug!(door_count = %self.door_count, "home screen active");
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.start_game(),
            KeyCode::Char('d') => {
                self.door_count = self.door_count.next_preset();
                ScreenTransition::Stay
            }
            KeyCode::Char('l') => {
                self.language = match self.language {
                    Language::English => Language::Japanese,
                    Language::Japanese => Language::English,
                };
                ScreenTransition::Stay
            }
            KeyCode::Char('q') | KeyCode::Esc => ScreenTransition::Exit,
            _ => ScreenTransition::Stay,
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let text = self.text();

        let [title_area, body_area, table_area, settings_area, help_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(7),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let title = Line::styled(text.title, style::TITLE).centered();

        let mut body = vec![Line::styled(text.intro_title, style::HEADING)];
        body.extend(text.intro.iter().map(|&line| Line::raw(line)));
        body.push(Line::default());
        body.push(Line::styled(text.rules_title, style::HEADING));
        body.extend(text.rules.iter().map(|&line| Line::raw(line)));
        body.push(Line::default());
        body.push(Line::raw(text.table_intro));
        let body = Paragraph::new(RatatuiText::from(body)).wrap(Wrap { trim: true });

        let settings = Line::from(vec![
            Span::raw(format!("{}: ", text.door_count)),
            Span::styled(self.door_count.to_string(), style::PICKED_DOOR),
            Span::raw("    "),
            Span::styled(format!("[Enter] {}", text.start), style::TITLE),
        ])
        .centered();

        let bindings: &[KeyBinding] = &[
            (&["Enter"], text.key_start),
            (&["d"], text.key_doors),
            (&["l"], "English/日本語"),
            (&["q"], text.key_quit),
        ];

        frame.render_widget(title, title_area);
        frame.render_widget(body, body_area);
        frame.render_widget(Self::outcome_table(text), table_area);
        frame.render_widget(settings, settings_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }
}
