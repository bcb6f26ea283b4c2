use std::fmt;

use crossterm::event::{Event, KeyEvent};
use ratatui::Frame;

/// A full-screen view with its own key handling.
///
/// # Lifecycle
///
/// ```text
/// Create
///   ↓
/// on_active() ←──────────┐
///   ↓                     │
/// (Foreground)            │ Child screen pops
///   ↓                     │
/// (Background) ──────────┘
///   ↓
/// on_close()  ← Only on Pop/Exit
///   ↓
/// Drop
/// ```
///
/// A screen owns whatever state it shows. Dropping it on Pop discards that
/// state, so a child screen that holds a game session loses the score when
/// the user goes back.
pub trait Screen: fmt::Debug {
    /// Called when the screen comes to the foreground, including on startup
    /// and when a child screen pops.
    fn on_active(&mut self) {}

    /// Called once before the screen is removed from the stack.
    fn on_close(&mut self) {}

    /// Handles a key press and returns the transition to apply.
    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition;

    fn draw(&self, frame: &mut Frame);
}

/// Stack change requested by a [`Screen`].
#[derive(Debug, derive_more::IsVariant)]
pub enum ScreenTransition {
    Stay,
    /// Put a new screen on top; the current one stays in the background.
    Push(Box<dyn Screen>),
    /// Close the current screen and return to the previous one.
    Pop,
    /// Close every screen and leave the application.
    Exit,
}

/// Screens in the order they were opened; only the top one is active.
#[derive(Debug)]
pub struct ScreenStack {
    screens: Vec<Box<dyn Screen>>,
    should_exit: bool,
}

impl ScreenStack {
    #[must_use]
    pub fn new(initial: Box<dyn Screen>) -> Self {
        Self {
            screens: vec![initial],
            should_exit: false,
        }
    }

    pub fn init(&mut self) {
        if let Some(screen) = self.screens.last_mut() {
            screen.on_active();
        }
    }

    #[must_use]
    pub fn should_exit(&self) -> bool {
        self.should_exit || self.screens.is_empty()
    }

    /// Dispatches a terminal event and returns whether a redraw is needed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) if key.is_press() => {
                if let Some(current) = self.screens.last_mut() {
                    let transition = current.handle_key(*key);
                    self.apply_transition(transition);
                }
                true
            }
            Event::Resize(..) => true,
            _ => false,
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        if let Some(current) = self.screens.last() {
            current.draw(frame);
        }
    }

    fn apply_transition(&mut self, transition: ScreenTransition) {
        match transition {
            ScreenTransition::Stay => {}
            ScreenTransition::Push(mut screen) => {
                screen.on_active();
                self.screens.push(screen);
            }
            ScreenTransition::Pop => {
                if let Some(mut screen) = self.screens.pop() {
                    screen.on_close();
                }
                if let Some(screen) = self.screens.last_mut() {
                    screen.on_active();
                }
            }
            ScreenTransition::Exit => {
                while let Some(mut screen) = self.screens.pop() {
                    screen.on_close();
                }
                self.should_exit = true;
            }
        }
        tracing::debug!(depth = self.screens.len(), "screen stack updated");
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crossterm::event::{KeyCode, KeyEventKind, KeyEventState, KeyModifiers};

    use super::*;

    #[derive(Debug, Clone, Default)]
    struct LifecycleLog {
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl LifecycleLog {
        fn log(&self, msg: impl Into<String>) {
            self.calls.borrow_mut().push(msg.into());
        }

        fn take(&self) -> Vec<String> {
            self.calls.borrow_mut().drain(..).collect()
        }
    }

    /// Screen that logs lifecycle calls and pushes a child on 'p'.
    #[derive(Debug)]
    struct TestScreen {
        name: &'static str,
        log: LifecycleLog,
    }

    impl TestScreen {
        fn boxed(name: &'static str, log: &LifecycleLog) -> Box<dyn Screen> {
            Box::new(Self {
                name,
                log: log.clone(),
            })
        }
    }

    impl Screen for TestScreen {
        fn on_active(&mut self) {
            self.log.log(format!("{}: on_active", self.name));
        }

        fn on_close(&mut self) {
            self.log.log(format!("{}: on_close", self.name));
        }

        fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition {
            self.log.log(format!("{}: handle_key", self.name));
            match key.code {
                KeyCode::Char('p') => ScreenTransition::Push(Self::boxed("child", &self.log)),
                KeyCode::Char('h') => ScreenTransition::Pop,
                KeyCode::Char('q') => ScreenTransition::Exit,
                _ => ScreenTransition::Stay,
            }
        }

        fn draw(&self, _frame: &mut Frame) {}
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn test_init_activates_initial_screen() {
        let log = LifecycleLog::default();
        let mut stack = ScreenStack::new(TestScreen::boxed("home", &log));
        stack.init();
        assert_eq!(log.take(), ["home: on_active"]);
        assert!(!stack.should_exit());
    }

    #[test]
    fn test_push_then_pop() {
        let log = LifecycleLog::default();
        let mut stack = ScreenStack::new(TestScreen::boxed("home", &log));
        stack.init();
        log.take();

        assert!(stack.handle_event(&key('p')));
        assert_eq!(log.take(), ["home: handle_key", "child: on_active"]);

        assert!(stack.handle_event(&key('h')));
        assert_eq!(
            log.take(),
            ["child: handle_key", "child: on_close", "home: on_active"]
        );
        assert!(!stack.should_exit());
    }

    #[test]
    fn test_exit_closes_every_screen() {
        let log = LifecycleLog::default();
        let mut stack = ScreenStack::new(TestScreen::boxed("home", &log));
        stack.init();
        stack.handle_event(&key('p'));
        log.take();

        stack.handle_event(&key('q'));
        assert_eq!(
            log.take(),
            ["child: handle_key", "child: on_close", "home: on_close"]
        );
        assert!(stack.should_exit());
    }

    #[test]
    fn test_popping_last_screen_exits() {
        let log = LifecycleLog::default();
        let mut stack = ScreenStack::new(TestScreen::boxed("home", &log));
        stack.init();
        stack.handle_event(&key('h'));
        assert!(stack.should_exit());
    }

    #[test]
    fn test_ignores_key_release_and_other_events() {
        let log = LifecycleLog::default();
        let mut stack = ScreenStack::new(TestScreen::boxed("home", &log));
        stack.init();
        log.take();

        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert!(!stack.handle_event(&release));
        assert!(!stack.handle_event(&Event::FocusGained));
        assert!(stack.handle_event(&Event::Resize(80, 24)));
        assert!(log.take().is_empty());
        assert!(!stack.should_exit());
    }
}
