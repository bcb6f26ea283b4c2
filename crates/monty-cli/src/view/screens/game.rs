use std::fmt;

use crossterm::event::{KeyCode, KeyEvent};
use monty_engine::{GameSession, Phase, RoundView, Strategy, TrialBatch, TrialMode};
use monty_stats::proportion::ProportionEstimate;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, Paragraph, Tabs, Wrap},
};

use crate::{
    text::{Language, Text},
    tui::{Screen, ScreenTransition},
    view::widgets::{
        DoorRow, KeyBinding, KeyBindingDisplay, MAX_DRAWN_DOORS, ScoreDisplay, WinRateChart,
        style,
    },
};

const DEFAULT_TRIALS: u64 = 1_000;
const MIN_TRIALS: u64 = 10;
const MAX_TRIALS: u64 = 1_000_000;

/// Longest door number that can be typed (door counts go up to 1000).
const MAX_INPUT_DIGITS: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Tab {
    #[default]
    Play,
    Simulation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    NextTab,
    CycleDoors,
    Home,
    Quit,
    // Play tab
    MoveCursor(isize),
    Digit(char),
    DeleteDigit,
    Confirm,
    Decide(Strategy),
    PlayAgain,
    // Simulation tab
    RunSimulation,
    ScaleTrials(bool),
    ToggleMode,
}

impl Action {
    fn from_key_event(event: &KeyEvent, tab: Tab, phase: Phase) -> Option<Self> {
        let action = match (event.code, tab, phase) {
            (KeyCode::Tab | KeyCode::BackTab, ..) => Self::NextTab,
            (KeyCode::Char('d'), ..) => Self::CycleDoors,
            (KeyCode::Char('h') | KeyCode::Esc, ..) => Self::Home,
            (KeyCode::Char('q'), ..) => Self::Quit,

            (KeyCode::Left, Tab::Play, Phase::AwaitingPick | Phase::AwaitingDecision) => {
                Self::MoveCursor(-1)
            }
            (KeyCode::Right, Tab::Play, Phase::AwaitingPick | Phase::AwaitingDecision) => {
                Self::MoveCursor(1)
            }
            (KeyCode::Char(c @ '0'..='9'), Tab::Play, Phase::AwaitingPick) => Self::Digit(c),
            (KeyCode::Backspace, Tab::Play, Phase::AwaitingPick) => Self::DeleteDigit,
            (KeyCode::Enter, Tab::Play, Phase::AwaitingPick | Phase::AwaitingDecision) => {
                Self::Confirm
            }
            (KeyCode::Char('s'), Tab::Play, Phase::AwaitingDecision) => {
                Self::Decide(Strategy::Stay)
            }
            (KeyCode::Char('w'), Tab::Play, Phase::AwaitingDecision) => {
                Self::Decide(Strategy::Switch)
            }
            (KeyCode::Enter | KeyCode::Char('n'), Tab::Play, Phase::Resolved) => Self::PlayAgain,

            (KeyCode::Enter, Tab::Simulation, _) => Self::RunSimulation,
            (KeyCode::Char('+') | KeyCode::Up, Tab::Simulation, _) => Self::ScaleTrials(true),
            (KeyCode::Char('-') | KeyCode::Down, Tab::Simulation, _) => Self::ScaleTrials(false),
            (KeyCode::Char('m'), Tab::Simulation, _) => Self::ToggleMode,
            _ => return None,
        };
        Some(action)
    }

    fn bindings(text: &'static Text, tab: Tab, phase: Phase) -> Vec<KeyBinding> {
        let mut bindings: Vec<KeyBinding> = vec![];
        match (tab, phase) {
            (Tab::Play, Phase::AwaitingPick) => bindings.extend_from_slice(&[
                (&["←", "→", "0-9"], text.key_select),
                (&["Enter"], text.key_confirm),
            ]),
            (Tab::Play, Phase::AwaitingDecision) => bindings.extend_from_slice(&[
                (&["s"], text.key_stay),
                (&["w"], text.key_switch),
                (&["←", "→"], text.key_select),
                (&["Enter"], text.key_confirm),
            ]),
            (Tab::Play, Phase::Resolved) => {
                bindings.extend_from_slice(&[(&["Enter", "n"], text.key_play_again)]);
            }
            (Tab::Simulation, _) => bindings.extend_from_slice(&[
                (&["Enter"], text.key_run),
                (&["+", "-"], text.key_trials),
                (&["m"], text.key_mode),
            ]),
        }
        bindings.extend_from_slice(&[
            (&["Tab"], text.key_tab),
            (&["d"], text.key_doors),
            (&["h"], text.key_home),
            (&["q"], text.key_quit),
        ]);
        bindings
    }
}

/// Game screen: a Play tab for single rounds and a Simulation tab for the
/// repeated-trial proof, sharing one session and scoreboard.
///
/// Closing the screen drops the session, so going home resets the score.
#[derive(Debug)]
pub struct GameScreen {
    text: &'static Text,
    session: GameSession,
    tab: Tab,
    cursor: usize,
    door_input: String,
    trial_count: u64,
    batch: Option<TrialBatch>,
    status: Option<String>,
}

impl GameScreen {
    pub fn new(language: Language, session: GameSession) -> Self {
        Self {
            text: language.text(),
            session,
            tab: Tab::default(),
            cursor: 1,
            door_input: String::new(),
            trial_count: DEFAULT_TRIALS,
            batch: None,
            status: None,
        }
    }

    fn reject(&mut self, err: impl fmt::Display) {
        tracing::debug!(%err, "action rejected");
        self.status = Some(err.to_string());
    }

    fn reset_round_input(&mut self) {
        self.cursor = 1;
        self.door_input.clear();
    }

    fn apply(&mut self, action: Action) -> ScreenTransition {
        match action {
            Action::NextTab => {
                self.tab = match self.tab {
                    Tab::Play => Tab::Simulation,
                    Tab::Simulation => Tab::Play,
                };
            }
            Action::CycleDoors => {
                let door_count = self.session.door_count().next_preset();
                self.session.new_round(door_count);
                self.reset_round_input();
                self.batch = None;
            }
            Action::Home => return ScreenTransition::Pop,
            Action::Quit => return ScreenTransition::Exit,
            Action::MoveCursor(step) => self.move_cursor(step),
            Action::Digit(digit) => self.type_digit(digit),
            Action::DeleteDigit => {
                self.door_input.pop();
            }
            Action::Confirm => self.confirm(),
            Action::Decide(strategy) => {
                if let Err(err) = self.session.decide(strategy) {
                    self.reject(err);
                }
            }
            Action::PlayAgain => {
                self.session.restart();
                self.reset_round_input();
            }
            Action::RunSimulation => self.run_simulation(),
            Action::ScaleTrials(up) => {
                self.trial_count = if up {
                    self.trial_count.saturating_mul(10).min(MAX_TRIALS)
                } else {
                    (self.trial_count / 10).max(MIN_TRIALS)
                };
            }
            Action::ToggleMode => {
                let mode = match self.session.trial_mode() {
                    TrialMode::Shortcut => TrialMode::FullRound,
                    TrialMode::FullRound => TrialMode::Shortcut,
                };
                self.session.set_trial_mode(mode);
            }
        }
        ScreenTransition::Stay
    }

    /// Before the pick the cursor walks every door; after it, only the picked
    /// door and the closed alternative are selectable.
    fn move_cursor(&mut self, step: isize) {
        let view = self.session.view();
        match (view.user_pick, view.closed_alternative) {
            (Some(user_pick), Some(closed)) => {
                self.cursor = if self.cursor == user_pick {
                    closed
                } else {
                    user_pick
                };
            }
            _ => {
                let count = view.door_count.get();
                self.cursor = if step < 0 {
                    if self.cursor <= 1 { count } else { self.cursor - 1 }
                } else if self.cursor >= count {
                    1
                } else {
                    self.cursor + 1
                };
                self.door_input.clear();
            }
        }
    }

    fn type_digit(&mut self, digit: char) {
        let door_count = self.session.door_count();
        if self.door_input.len() < MAX_INPUT_DIGITS {
            self.door_input.push(digit);
        }
        // Every door is on screen, so a digit picks directly.
        if door_count.get() <= MAX_DRAWN_DOORS {
            self.confirm();
            return;
        }
        if let Ok(door) = self.door_input.parse::<usize>()
            && door_count.contains(door)
        {
            self.cursor = door;
        }
    }

    fn confirm(&mut self) {
        match self.session.round().phase() {
            Phase::AwaitingPick => {
                let door = if self.door_input.is_empty() {
                    self.cursor
                } else {
                    self.door_input.parse().unwrap_or(0)
                };
                self.pick(door);
            }
            Phase::AwaitingDecision => {
                if let Err(err) = self.session.decide_door(self.cursor) {
                    self.reject(err);
                }
            }
            Phase::Resolved => {}
        }
    }

    fn pick(&mut self, door: usize) {
        self.door_input.clear();
        match self.session.pick(door) {
            Ok(view) => self.cursor = view.user_pick.unwrap_or(door),
            Err(err) => self.reject(err),
        }
    }

    fn run_simulation(&mut self) {
        let door_count = self.session.door_count().get();
        match self.session.run_trials(door_count, self.trial_count) {
            Ok(batch) => self.batch = Some(batch),
            Err(err) => self.reject(err),
        }
    }

    fn draw_play(&self, frame: &mut Frame, area: Rect, view: &RoundView) {
        let text = self.text;
        let doors = DoorRow::new(view, text, self.cursor)
            .block(Block::bordered().merge_borders(MergeStrategy::Exact));

        let [host_area, prompt_area, doors_area, info_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(doors.height()),
            Constraint::Fill(1),
        ])
        .areas(area);

        let host_line = match (view.phase, view.win) {
            (Phase::AwaitingPick, _) => text.host_intro,
            (Phase::AwaitingDecision, _) => text.host_reveal,
            (Phase::Resolved, Some(true)) => text.host_win,
            (Phase::Resolved, _) => text.host_lose,
        };
        let host = Paragraph::new(Line::styled(host_line, style::HOST))
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .merge_borders(MergeStrategy::Exact)
                    .title(text.host_name),
            );

        let prompt = match view.phase {
            Phase::AwaitingPick => text.pick_prompt,
            Phase::AwaitingDecision => text.switch_prompt,
            Phase::Resolved => "",
        };

        frame.render_widget(host, host_area);
        frame.render_widget(Line::raw(prompt).centered(), prompt_area);
        frame.render_widget(doors, doors_area);
        frame.render_widget(
            Paragraph::new(self.play_info(view)).centered(),
            info_area,
        );
    }

    fn play_info(&self, view: &RoundView) -> Vec<Line<'static>> {
        let text = self.text;
        let large = view.door_count.get() > MAX_DRAWN_DOORS;
        let mut lines = vec![];
        match view.phase {
            Phase::AwaitingPick => {
                if large {
                    let input = if self.door_input.is_empty() {
                        self.cursor.to_string()
                    } else {
                        format!("{}_", self.door_input)
                    };
                    lines.push(Line::from(vec![
                        Span::raw(format!("{} (1-{}): ", text.door_input, view.door_count)),
                        Span::styled(input, style::CURSOR_DOOR),
                    ]));
                }
            }
            Phase::AwaitingDecision | Phase::Resolved => {
                if let (Some(user_pick), Some(closed)) = (view.user_pick, view.closed_alternative)
                {
                    lines.push(Line::from(vec![
                        Span::raw(format!("{}: ", text.you_picked)),
                        Span::styled(format!("{} {user_pick}", text.door), style::PICKED_DOOR),
                        Span::raw(format!("    {}: ", text.host_left_closed)),
                        Span::styled(format!("{} {closed}", text.door), style::CURSOR_DOOR),
                    ]));
                }
                lines.push(Line::styled(
                    format!("{}: {}", text.opened_doors, view.revealed_doors.len()),
                    style::OPEN_DOOR,
                ));
            }
        }
        if let (Some(win), Some(prize_door)) = (view.win, view.prize_door) {
            lines.push(Line::default());
            let (message, message_style) = if win {
                (text.you_won, style::WIN)
            } else {
                (text.you_lost, style::LOSE)
            };
            lines.push(Line::styled(message, message_style));
            lines.push(Line::raw(format!(
                "{}: {} {prize_door}",
                text.car_was_behind, text.door
            )));
        }
        lines
    }

    fn draw_simulation(&self, frame: &mut Frame, area: Rect) {
        let text = self.text;
        let [settings_area, chart_area, rates_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(4),
        ])
        .areas(area);

        let settings = Line::raw(format!(
            "{}: {}    {}: {}    {}: {}",
            text.door_count,
            self.session.door_count(),
            text.trials,
            self.trial_count,
            text.mode,
            self.session.trial_mode()
        ))
        .centered();
        frame.render_widget(settings, settings_area);

        let Some(batch) = &self.batch else {
            frame.render_widget(
                Line::styled(text.no_simulation, style::HELP).centered(),
                chart_area,
            );
            return;
        };

        let chart = WinRateChart::new(batch, text).block(
            Block::bordered()
                .merge_borders(MergeStrategy::Exact)
                .title(text.simulation_tab),
        );
        let rates = Strategy::ALL
            .into_iter()
            .map(|strategy| Self::rate_line(text, batch, strategy))
            .collect::<Vec<_>>();

        frame.render_widget(chart, chart_area);
        frame.render_widget(Paragraph::new(rates).centered(), rates_area);
    }

    fn rate_line(text: &'static Text, batch: &TrialBatch, strategy: Strategy) -> Line<'static> {
        let label = match strategy {
            Strategy::Stay => text.stay_rate,
            Strategy::Switch => text.switch_rate,
        };
        let theory = batch.theoretical_win_rate(strategy) * 100.0;
        let interval = ProportionEstimate::new(batch.wins(strategy), batch.trial_count)
            .map(|estimate| {
                format!(
                    " [{:.1}%, {:.1}%]",
                    estimate.lower_95 * 100.0,
                    estimate.upper_95 * 100.0
                )
            })
            .unwrap_or_default();
        Line::raw(format!(
            "{label}: {:.1}%{interval}  ({} {theory:.1}%)",
            batch.win_rate(strategy) * 100.0,
            text.theory
        ))
    }
}

impl Screen for GameScreen {
    fn on_active(&mut self) {
        tracing::debug!(door_count = %self.session.door_count(), "game screen active");
    }

    fn on_close(&mut self) {
        let score = self.session.score();
        tracing::info!(
            wins = score.wins(),
            losses = score.losses(),
            "game closed, score discarded"
        );
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition {
        let phase = self.session.round().phase();
        let Some(action) = Action::from_key_event(&key, self.tab, phase) else {
            return ScreenTransition::Stay;
        };
        self.status = None;
        self.apply(action)
    }

    fn draw(&self, frame: &mut Frame) {
        let text = self.text;
        let view = self.session.view();
        let score = ScoreDisplay::new(self.session.score(), text).block(
            Block::bordered()
                .merge_borders(MergeStrategy::Exact)
                .title(text.score),
        );

        let [tabs_area, main_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        let [body_area, side_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(score.width())])
                .areas(main_area);
        let [score_area, _] =
            Layout::vertical([Constraint::Length(score.height()), Constraint::Fill(1)])
                .areas(side_area);

        let selected = match self.tab {
            Tab::Play => 0,
            Tab::Simulation => 1,
        };
        let tabs = Tabs::new([text.play_tab, text.simulation_tab])
            .select(selected)
            .highlight_style(style::TITLE)
            .block(
                Block::bordered()
                    .merge_borders(MergeStrategy::Exact)
                    .title(format!("{} {}", view.door_count, text.door_count)),
            );

        frame.render_widget(tabs, tabs_area);
        match self.tab {
            Tab::Play => self.draw_play(frame, body_area, &view),
            Tab::Simulation => self.draw_simulation(frame, body_area),
        }
        frame.render_widget(score, score_area);
        if let Some(status) = &self.status {
            frame.render_widget(
                Line::styled(status.as_str(), style::ERROR).centered(),
                status_area,
            );
        }
        let bindings = Action::bindings(text, self.tab, view.phase);
        frame.render_widget(KeyBindingDisplay::new(&bindings), help_area);
    }
}
