use std::io;

use crossterm::event;

use crate::tui::ScreenStack;

/// Runs `stack` until it asks to exit.
///
/// The loop blocks on terminal input and only redraws after an event that
/// can change what is on screen (key press or resize). There are no ticks.
pub fn run(stack: &mut ScreenStack) -> io::Result<()> {
    stack.init();

    ratatui::run(|terminal| {
        let mut dirty = true;
        while !stack.should_exit() {
            if dirty {
                terminal.draw(|frame| stack.draw(frame))?;
            }
            dirty = stack.handle_event(&event::read()?);
        }
        Ok(())
    })
}
